//! The Persona entity

use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned identifier of a persona
pub type PersonaId = i64;

/// A person record: given name, family name, age.
///
/// Fields missing from an incoming JSON body default to `null` for the
/// names and `0` for the age; an explicit `null` age is also `0`. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PersonaId>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub edad: i32,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Option::<i32>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Persona {
    pub fn new(nombre: impl Into<String>, apellido: impl Into<String>, edad: i32) -> Self {
        Self {
            id: None,
            nombre: Some(nombre.into()),
            apellido: Some(apellido.into()),
            edad,
        }
    }

    /// Same record with the identifier cleared, so saving it creates a new row.
    pub fn without_id(self) -> Self {
        Self { id: None, ..self }
    }

    /// Replace the mutable fields with those of `details`; `id` is kept.
    pub fn apply_details(&mut self, details: Persona) {
        self.nombre = details.nombre;
        self.apellido = details.apellido;
        self.edad = details.edad;
    }
}
