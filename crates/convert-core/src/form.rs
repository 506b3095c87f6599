//! Form state store for conversion parameters.
//!
//! Holds the last-edited value of every form field. The store is an explicit
//! object handed to whoever needs it; cloning it shares the same state.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::conversion::ConversionRequest;

/// Addressable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ModelId,
    Filename,
    HfToken,
    ReferenceModel,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::ModelId => "model_id",
            FormField::Filename => "filename",
            FormField::HfToken => "hf_token",
            FormField::ReferenceModel => "reference_model",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared, observable store of the current form values.
#[derive(Debug, Clone)]
pub struct FormStore {
    tx: Arc<watch::Sender<ConversionRequest>>,
}

impl FormStore {
    /// Create a store initialized with [`FormStore::defaults`].
    pub fn new() -> Self {
        Self::with_values(Self::defaults())
    }

    /// Create a store initialized with the given values.
    pub fn with_values(initial: ConversionRequest) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// The baseline record every fresh form starts from.
    pub fn defaults() -> ConversionRequest {
        ConversionRequest::default()
    }

    /// Snapshot of the current values.
    pub fn read(&self) -> ConversionRequest {
        self.tx.borrow().clone()
    }

    /// Replace the whole record and notify subscribers.
    pub fn write(&self, next: ConversionRequest) {
        self.tx.send_replace(next);
    }

    /// Replace a single field, keeping the others as they are.
    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        if field != FormField::HfToken {
            debug!("Form field {} set to {:?}", field, value);
        }

        self.tx.send_modify(|next| match field {
            FormField::ModelId => next.model_id = value,
            FormField::Filename => next.filename = value,
            FormField::HfToken => next.hf_token = value,
            FormField::ReferenceModel => next.reference_model = value,
        });
    }

    /// Observe changes to the form.
    pub fn subscribe(&self) -> watch::Receiver<ConversionRequest> {
        self.tx.subscribe()
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_holds_defaults() {
        let store = FormStore::new();
        let values = store.read();

        assert_eq!(values.model_id, "");
        assert_eq!(values.filename, "");
        assert_eq!(values.reference_model, "CompVis/stablediffusion-v1-4");
        assert_eq!(values.hf_token, "");
        assert_eq!(values, FormStore::defaults());
    }

    #[test]
    fn test_write_replaces_record() {
        let store = FormStore::new();
        let next = ConversionRequest {
            model_id: "CompVis/sd".into(),
            filename: "a.ckpt".into(),
            reference_model: "CompVis/sd".into(),
            hf_token: "hf_abc".into(),
        };
        store.write(next.clone());
        assert_eq!(store.read(), next);
    }

    #[test]
    fn test_set_field_keeps_other_fields() {
        let store = FormStore::new();
        store.set_field(FormField::ModelId, "CompVis/sd");
        store.set_field(FormField::Filename, "a.ckpt");

        let values = store.read();
        assert_eq!(values.model_id, "CompVis/sd");
        assert_eq!(values.filename, "a.ckpt");
        assert_eq!(values.reference_model, "CompVis/stablediffusion-v1-4");
    }

    #[test]
    fn test_clones_share_state() {
        let store = FormStore::new();
        let view = store.clone();
        store.set_field(FormField::HfToken, "hf_xyz");
        assert_eq!(view.read().hf_token, "hf_xyz");
    }

    #[test]
    fn test_concurrent_edits_on_different_fields_are_kept() {
        let store = FormStore::new();
        let editors: Vec<_> = [FormField::ModelId, FormField::Filename]
            .into_iter()
            .map(|field| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let mut lost = 0;
                    for i in 0..20_000 {
                        let value = format!("{}-{}", field, i);
                        store.set_field(field, value.clone());
                        let current = store.read();
                        let seen = match field {
                            FormField::ModelId => current.model_id,
                            _ => current.filename,
                        };
                        if seen != value {
                            lost += 1;
                        }
                    }
                    lost
                })
            })
            .collect();

        let lost: usize = editors.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(lost, 0);

        let values = store.read();
        assert_eq!(values.model_id, "model_id-19999");
        assert_eq!(values.filename, "filename-19999");
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let store = FormStore::new();
        let mut rx = store.subscribe();

        store.set_field(FormField::Filename, "b.ckpt");

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().filename, "b.ckpt");
    }
}
