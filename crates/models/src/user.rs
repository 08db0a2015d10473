use serde::{Deserialize, Serialize};

use crate::body::{bmi, Verdict};
use crate::errors::ModelError;

pub const MIN_AGE_EXCLUSIVE: i64 = 0;
pub const MAX_AGE_EXCLUSIVE: i64 = 120;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

/// Persisted shape of a user. The id is the map key and derived fields are
/// never written, so neither appears here.
///
/// Height and weight default to 0 when absent from the file; such entries
/// have no BMI and sort as 0.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredUser {
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: Gender,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub weight: f64,
}

impl StoredUser {
    /// Field constraints shared by create and update.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.age <= MIN_AGE_EXCLUSIVE || self.age >= MAX_AGE_EXCLUSIVE {
            return Err(ModelError::invalid("age", "must be greater than 0 and less than 120"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ModelError::invalid("height", "must be greater than 0"));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(ModelError::invalid("weight", "must be greater than 0"));
        }
        Ok(())
    }

    pub fn bmi(&self) -> Option<f64> {
        bmi(self.height, self.weight)
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.bmi().map(Verdict::from_bmi)
    }

    /// Render with the given id and freshly derived fields.
    pub fn to_record(&self, id: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            name: self.name.clone(),
            city: self.city.clone(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi: self.bmi(),
            verdict: self.verdict(),
        }
    }
}

/// Create payload: the stored fields plus the id that becomes the map key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserInput {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

impl UserInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_id(&self.id)?;
        self.to_stored().validate()
    }

    pub fn to_stored(&self) -> StoredUser {
        StoredUser {
            name: self.name.clone(),
            city: self.city.clone(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
        }
    }

    /// Validate and split into `(id, stored)`.
    pub fn into_parts(self) -> Result<(String, StoredUser), ModelError> {
        self.validate()?;
        let stored = self.to_stored();
        Ok((self.id, stored))
    }
}

/// Ids are opaque: only the empty string is rejected.
pub fn validate_id(id: &str) -> Result<(), ModelError> {
    if id.is_empty() {
        return Err(ModelError::invalid("id", "must not be empty"));
    }
    Ok(())
}

/// Sparse update: only `Some` fields are applied.
///
/// A field sent as JSON `null` deserializes to `None` and is treated as unset.
/// Unknown keys (including `id`) are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }

    /// Merge onto `base` field by field. Validation is left to the caller so
    /// the merged record is checked as a whole.
    pub fn apply_to(&self, base: &StoredUser) -> StoredUser {
        let mut merged = base.clone();
        if let Some(name) = &self.name { merged.name = name.clone(); }
        if let Some(city) = &self.city { merged.city = city.clone(); }
        if let Some(age) = self.age { merged.age = age; }
        if let Some(gender) = self.gender { merged.gender = gender; }
        if let Some(height) = self.height { merged.height = height; }
        if let Some(weight) = self.weight { merged.weight = weight; }
        merged
    }
}

/// Rendered user with derived fields, as returned to callers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: Option<f64>,
    pub verdict: Option<Verdict>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asha() -> UserInput {
        UserInput {
            id: "P001".into(),
            name: "Asha".into(),
            city: "Pune".into(),
            age: 30,
            gender: Gender::Female,
            height: 1.60,
            weight: 55.0,
        }
    }

    #[test]
    fn input_splits_into_key_and_stored_value() {
        let (id, stored) = asha().into_parts().unwrap();
        assert_eq!(id, "P001");
        assert_eq!(stored.name, "Asha");
        assert_eq!(stored.bmi(), Some(21.48));
        assert_eq!(stored.verdict(), Some(Verdict::Normal));
    }

    #[test]
    fn stored_user_serializes_without_id_or_derived_fields() {
        let (_, stored) = asha().into_parts().unwrap();
        let v = serde_json::to_value(&stored).unwrap();
        let obj = v.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["age", "city", "gender", "height", "name", "weight"]);
        assert_eq!(obj["gender"], "female");
    }

    #[test]
    fn age_bounds_are_exclusive() {
        for age in [0, -3, 120, 200] {
            let mut input = asha();
            input.age = age;
            assert!(matches!(input.validate(), Err(ModelError::Validation(_))), "age {age}");
        }
        for age in [1, 119] {
            let mut input = asha();
            input.age = age;
            assert!(input.validate().is_ok(), "age {age}");
        }
    }

    #[test]
    fn height_and_weight_must_be_positive() {
        let mut input = asha();
        input.height = 0.0;
        assert!(input.validate().is_err());

        let mut input = asha();
        input.weight = -1.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn only_empty_id_is_rejected() {
        let mut input = asha();
        input.id = String::new();
        assert!(input.validate().is_err());

        input.id = "  ".into();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn unknown_gender_fails_to_deserialize() {
        let raw = r#"{"id":"P9","name":"x","city":"y","age":20,"gender":"robot","height":1.7,"weight":60}"#;
        assert!(serde_json::from_str::<UserInput>(raw).is_err());
    }

    #[test]
    fn missing_height_reads_as_zero_without_bmi() {
        let raw = r#"{"name":"x","city":"y","age":20,"gender":"male","weight":60}"#;
        let stored: StoredUser = serde_json::from_str(raw).unwrap();
        assert_eq!(stored.height, 0.0);
        assert_eq!(stored.bmi(), None);
        assert_eq!(stored.to_record("P9").verdict, None);
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let (_, base) = asha().into_parts().unwrap();
        let patch: UserPatch = serde_json::from_str(r#"{"weight": 90.0, "city": null, "id": "X"}"#).unwrap();
        let merged = patch.apply_to(&base);
        assert_eq!(merged.weight, 90.0);
        assert_eq!(merged.city, "Pune");
        assert_eq!(merged.name, "Asha");
        assert_eq!(merged.bmi(), Some(35.16));
        assert_eq!(merged.verdict(), Some(Verdict::Obese));
    }

    #[test]
    fn empty_patch_is_identity() {
        let (_, base) = asha().into_parts().unwrap();
        let patch = UserPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply_to(&base), base);
    }
}
