use serde::{Deserialize, Deserializer, Serialize};

pub type HospitalId = i64;

/// Persisted hospital record. `id` is caller-assigned and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: HospitalId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hospital_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub patient_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
}

/// Mutable fields, as sent in create/update bodies.
/// Absent or `null` fields fall back to empty string / zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HospitalInput {
    #[serde(deserialize_with = "null_as_default")]
    pub hospital_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub patient_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Hospital {
    pub fn new(id: HospitalId, input: HospitalInput) -> Self {
        Self {
            id,
            hospital_name: input.hospital_name,
            patient_count: input.patient_count,
            location: input.location,
        }
    }

    /// Replace every mutable field, keeping `id`.
    pub fn apply(&mut self, input: HospitalInput) {
        self.hospital_name = input.hospital_name;
        self.patient_count = input.patient_count;
        self.location = input.location;
    }
}
