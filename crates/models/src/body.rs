use serde::{Deserialize, Serialize};

/// Weight category derived from BMI.
///
/// The 25 to 30 band is reported as `Normal`, matching the registry's
/// established output rather than the conventional "Overweight" label.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    Underweight,
    Normal,
    Obese,
}

impl Verdict {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Verdict::Underweight
        } else if bmi < 30.0 {
            Verdict::Normal
        } else {
            Verdict::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Obese => "Obese",
        }
    }
}

/// `weight / height²` rounded to two decimals.
/// `None` when either input is non-positive or not finite.
pub fn bmi(height: f64, weight: f64) -> Option<f64> {
    if !(height.is_finite() && weight.is_finite()) || height <= 0.0 || weight <= 0.0 {
        return None;
    }
    Some(round2(weight / height.powi(2)))
}

/// Round the exact binary value, ties to even. Scaling by 100 first would
/// add noise and push ties away from zero.
fn round2(v: f64) -> f64 {
    format!("{v:.2}").parse().unwrap_or(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_rounds_to_two_decimals() {
        assert_eq!(bmi(1.60, 55.0), Some(21.48));
        assert_eq!(bmi(1.60, 90.0), Some(35.16));
        assert_eq!(bmi(1.72, 75.2), Some(25.42));
        assert_eq!(bmi(2.0, 72.0), Some(18.0));
        assert_eq!(bmi(1.76, 48.4), Some(15.62));
        // 10.125 is an exact tie and goes to the even digit
        assert_eq!(bmi(2.0, 40.5), Some(10.12));
    }

    #[test]
    fn bmi_undefined_for_non_positive_inputs() {
        assert_eq!(bmi(0.0, 70.0), None);
        assert_eq!(bmi(1.8, 0.0), None);
        assert_eq!(bmi(-1.8, 70.0), None);
        assert_eq!(bmi(f64::NAN, 70.0), None);
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(Verdict::from_bmi(18.49), Verdict::Underweight);
        assert_eq!(Verdict::from_bmi(18.5), Verdict::Normal);
        assert_eq!(Verdict::from_bmi(24.99), Verdict::Normal);
        // 25..30 stays Normal
        assert_eq!(Verdict::from_bmi(27.0), Verdict::Normal);
        assert_eq!(Verdict::from_bmi(29.99), Verdict::Normal);
        assert_eq!(Verdict::from_bmi(30.0), Verdict::Obese);
    }

    #[test]
    fn verdict_serializes_as_label() {
        let v = serde_json::to_value(Verdict::Underweight).unwrap();
        assert_eq!(v, serde_json::json!("Underweight"));
        assert_eq!(Verdict::Obese.as_str(), "Obese");
    }
}
