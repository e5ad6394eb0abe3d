//! Start/complete logging around a unit of work
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` with `duration_ms` on `complete()`
//! - Logs `{name}_FAILED` with the reason on `fail()`
//! - Logs `{name}_INCOMPLETE` if dropped before either

use std::time::Instant;

use super::logger::Logger;

/// A scope that logs the lifecycle of one operation
///
/// ```ignore
/// let scope = OperationScope::new("DB_OPEN", &[("mode", "file")]);
/// match open() {
///     Ok(conn) => { scope.complete(); Ok(conn) }
///     Err(e) => { scope.fail(&e.to_string()); Err(e) }
/// }
/// ```
pub struct OperationScope {
    name: String,
    fields: Vec<(String, String)>,
    started_at: Instant,
    finished: bool,
}

impl OperationScope {
    pub fn new(name: &str, fields: &[(&str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);

        Self {
            name: name.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            started_at: Instant::now(),
            finished: false,
        }
    }

    /// Milliseconds since the scope was opened
    pub fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }

    pub fn complete(mut self) {
        self.finished = true;
        let duration = self.elapsed_ms().to_string();
        let mut fields = self.field_refs();
        fields.push(("duration_ms", duration.as_str()));
        Logger::info(&format!("{}_COMPLETE", self.name), &fields);
    }

    pub fn fail(mut self, reason: &str) {
        self.finished = true;
        let duration = self.elapsed_ms().to_string();
        let mut fields = self.field_refs();
        fields.push(("duration_ms", duration.as_str()));
        fields.push(("reason", reason));
        Logger::error(&format!("{}_FAILED", self.name), &fields);
    }

    fn field_refs(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl Drop for OperationScope {
    fn drop(&mut self) {
        if !self.finished {
            let mut fields = self.field_refs();
            fields.push(("reason", "scope dropped without completion"));
            Logger::warn(&format!("{}_INCOMPLETE", self.name), &fields);
        }
    }
}
