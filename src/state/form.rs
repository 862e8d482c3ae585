//! Detail/edit form state
//!
//! Forms move through an explicit state machine:
//!
//! ```text
//! Loading -> Ready | LoadError
//! Ready | Failed -> Submitting -> Succeeded | Failed
//! ```
//!
//! Field values are held as text and encoded as JSON or multipart form data
//! at submit time. File slots left empty are omitted from the request.

use std::collections::BTreeMap;
use std::fmt;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use crate::api::{FieldErrors, FileAttachment, FormData};
use crate::utils::errors::{AdminError, Result};
use crate::utils::helpers::clamp_chars;

/// Message shown when advisory required-field validation fails
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// How a field is entered and encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Flag,
    File,
}

/// Declaration of one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub max_len: Option<usize>,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::of(name, label, FieldKind::Text)
    }

    pub const fn integer(name: &'static str, label: &'static str) -> Self {
        Self::of(name, label, FieldKind::Integer)
    }

    pub const fn flag(name: &'static str, label: &'static str) -> Self {
        Self::of(name, label, FieldKind::Flag)
    }

    pub const fn file(name: &'static str, label: &'static str) -> Self {
        Self::of(name, label, FieldKind::File)
    }

    const fn of(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            max_len: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }
}

/// Ordered set of field declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

/// Lifecycle of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Loading,
    Ready,
    LoadError(String),
    Submitting,
    Succeeded,
    Failed(String),
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormStatus::Loading => "loading",
            FormStatus::Ready => "ready",
            FormStatus::LoadError(_) => "load_error",
            FormStatus::Submitting => "submitting",
            FormStatus::Succeeded => "succeeded",
            FormStatus::Failed(_) => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    status: FormStatus,
    values: BTreeMap<String, String>,
    files: BTreeMap<String, FileAttachment>,
    field_errors: FieldErrors,
}

impl FormState {
    /// A blank form ready for input (create screens)
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            status: FormStatus::Ready,
            values: BTreeMap::new(),
            files: BTreeMap::new(),
            field_errors: FieldErrors::default(),
        }
    }

    /// A form waiting for its record (edit screens)
    pub fn loading(schema: FormSchema) -> Self {
        Self {
            status: FormStatus::Loading,
            ..Self::new(schema)
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    fn transition(&mut self, to: FormStatus) -> Result<()> {
        let allowed = matches!(
            (&self.status, &to),
            (FormStatus::Loading, FormStatus::Ready)
                | (FormStatus::Loading, FormStatus::LoadError(_))
                | (FormStatus::Ready, FormStatus::Submitting)
                | (FormStatus::Ready, FormStatus::Failed(_))
                | (FormStatus::Failed(_), FormStatus::Submitting)
                | (FormStatus::Failed(_), FormStatus::Failed(_))
                | (FormStatus::Submitting, FormStatus::Succeeded)
                | (FormStatus::Submitting, FormStatus::Failed(_))
        );

        if !allowed {
            return Err(AdminError::InvalidStateTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }

        debug!(from = %self.status, to = %to, "Form transition");
        self.status = to;
        Ok(())
    }

    /// Fill the form from a loaded record; fields are matched by name
    pub fn finish_load<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let Value::Object(map) = serde_json::to_value(record)? else {
            return Err(AdminError::InvalidInput("record is not an object".to_string()));
        };

        let names: Vec<&'static str> = self
            .schema
            .fields
            .iter()
            .filter(|spec| spec.kind != FieldKind::File)
            .map(|spec| spec.name)
            .collect();

        for name in names {
            let text = match map.get(name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => String::new(),
            };
            self.store(name, text);
        }

        self.transition(FormStatus::Ready)
    }

    pub fn fail_load(&mut self, message: impl Into<String>) -> Result<()> {
        self.transition(FormStatus::LoadError(message.into()))
    }

    /// Set a text value; input beyond the field's limit is truncated
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<&str> {
        let spec = self
            .schema
            .field(name)
            .ok_or_else(|| AdminError::InvalidInput(format!("Unknown field: {}", name)))?;
        if spec.kind == FieldKind::File {
            return Err(AdminError::InvalidInput(format!("{} expects a file", spec.label)));
        }
        let name = spec.name;
        Ok(self.store(name, value.into()))
    }

    fn store(&mut self, name: &'static str, value: String) -> &str {
        let value = match self.schema.field(name).and_then(|spec| spec.max_len) {
            Some(max) => clamp_chars(&value, max),
            None => value,
        };
        let slot = self.values.entry(name.to_string()).or_default();
        *slot = value;
        slot.as_str()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some("true") | Some("1"))
    }

    /// Attach a file to a file slot
    pub fn attach(&mut self, name: &str, file: FileAttachment) -> Result<()> {
        match self.schema.field(name) {
            Some(spec) if spec.kind == FieldKind::File => {
                self.files.insert(name.to_string(), file);
                Ok(())
            }
            Some(spec) => Err(AdminError::InvalidInput(format!("{} is not a file field", spec.label))),
            None => Err(AdminError::InvalidInput(format!("Unknown field: {}", name))),
        }
    }

    /// Clear a file slot, keeping whatever the backend already stores
    pub fn detach(&mut self, name: &str) -> Option<FileAttachment> {
        self.files.remove(name)
    }

    pub fn file(&self, name: &str) -> Option<&FileAttachment> {
        self.files.get(name)
    }

    /// Presence and integer checks, keyed by field name
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for spec in &self.schema.fields {
            let value = self.get(spec.name).map(str::trim).unwrap_or_default();
            let present = match spec.kind {
                FieldKind::File => self.files.contains_key(spec.name),
                _ => !value.is_empty(),
            };

            if spec.required && !present {
                errors.push(spec.name, format!("{} is required", spec.label));
            }
            if spec.kind == FieldKind::Integer && !value.is_empty() && value.parse::<i64>().is_err() {
                errors.push(spec.name, format!("{} must be a whole number", spec.label));
            }
        }
        errors
    }

    /// Enter `Submitting`; rejected while another submit is in flight or
    /// when local validation fails
    pub fn begin_submit(&mut self) -> Result<()> {
        if self.is_submitting() {
            return Err(AdminError::SubmitInProgress);
        }

        let errors = self.validate();
        if !errors.is_empty() {
            self.field_errors = errors.clone();
            self.transition(FormStatus::Failed(REQUIRED_FIELDS_MESSAGE.to_string()))?;
            return Err(AdminError::Validation(errors));
        }

        self.transition(FormStatus::Submitting)?;
        self.field_errors = FieldErrors::default();
        Ok(())
    }

    pub fn succeed(&mut self) -> Result<()> {
        self.transition(FormStatus::Succeeded)
    }

    /// Record a failed submit; server field errors are kept for display
    pub fn fail(&mut self, error: &AdminError) -> Result<()> {
        if let AdminError::Validation(errors) = error {
            self.field_errors = errors.clone();
        }
        self.transition(FormStatus::Failed(error.user_message()))
    }

    /// Multipart body: every non-file field, plus only the attached files
    pub fn to_form_data(&self) -> FormData {
        let mut form = FormData::new();
        for spec in &self.schema.fields {
            form = match spec.kind {
                FieldKind::File => form.maybe_file(spec.name, self.files.get(spec.name).cloned()),
                FieldKind::Flag => form.text(spec.name, self.flag(spec.name).to_string()),
                _ => form.text(spec.name, self.get(spec.name).unwrap_or_default()),
            };
        }
        form
    }

    /// JSON body of the non-file fields, with integers and flags typed
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for spec in &self.schema.fields {
            let raw = self.get(spec.name).unwrap_or_default();
            let value = match spec.kind {
                FieldKind::File => continue,
                FieldKind::Flag => Value::Bool(self.flag(spec.name)),
                FieldKind::Integer => raw
                    .trim()
                    .parse::<i64>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::String(raw.to_string())),
                FieldKind::Text if raw.is_empty() && !spec.required => Value::Null,
                FieldKind::Text => Value::String(raw.to_string()),
            };
            map.insert(spec.name.to_string(), value);
        }
        Value::Object(map)
    }
}
