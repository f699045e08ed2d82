//! Catalog assembly: fold records from every sheet into one collection keyed
//! by record ID.
//!
//! Merge policy: the first source to populate a field wins. Later sources
//! only fill fields that are still empty, so a later null never clobbers a
//! value and a later conflicting value is discarded. Conflicts are reported as
//! [`Disagreement`]s so they can be audited, but never change the result.

use std::collections::HashMap;
use std::fmt::Display;

use moto_catalog::Moto;

/// A field populated by two sources with different values.
#[derive(Debug, Clone, PartialEq)]
pub struct Disagreement {
    pub id: String,
    pub field: String,
    /// Value kept (from the first source).
    pub kept: String,
    /// Value discarded (from the later source).
    pub discarded: String,
    /// `file / sheet` of the record's creator.
    pub kept_source: String,
    /// `file / sheet` of the later contributor.
    pub other_source: String,
}

/// What a merge changed on the existing record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Fields that were empty and got a value (`specs.<key>` for specs).
    pub filled: Vec<String>,
    pub disagreements: Vec<Disagreement>,
}

/// Result of inserting one record into a [`CatalogAssembler`].
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    Created,
    Merged(MergeReport),
}

/// Merge `incoming` into `existing` in place.
///
/// Identity, provenance and `created_at` always stay with `existing`.
pub fn merge_into(existing: &mut Moto, incoming: Moto) -> MergeReport {
    let mut report = MergeReport::default();
    let kept_source = format!("{} / {}", existing.source_file, existing.sheet);
    let other_source = format!("{} / {}", incoming.source_file, incoming.sheet);
    let id = existing.id.clone();

    let mut check = |field: &str, kept: Option<String>, incoming: Option<String>| {
        match (kept, incoming) {
            (None, Some(_)) => report.filled.push(field.to_string()),
            (Some(kept), Some(discarded)) if kept != discarded => {
                report.disagreements.push(Disagreement {
                    id: id.clone(),
                    field: field.to_string(),
                    kept,
                    discarded,
                    kept_source: kept_source.clone(),
                    other_source: other_source.clone(),
                });
            }
            _ => {}
        }
    };

    check("price", display(&existing.price), display(&incoming.price));
    fill(&mut existing.price, incoming.price);
    check("category", existing.category.clone(), incoming.category.clone());
    fill(&mut existing.category, incoming.category);
    check("imageUrl", existing.image_url.clone(), incoming.image_url.clone());
    fill(&mut existing.image_url, incoming.image_url);

    for (key, value) in incoming.specs {
        let field = format!("specs.{key}");
        match existing.specs.get_mut(&key) {
            None => {
                if !value.is_null() {
                    check(&field, None, Some(value.to_string()));
                }
                existing.specs.insert(key, value);
            }
            Some(current) if current.is_null() => {
                if !value.is_null() {
                    check(&field, None, Some(value.to_string()));
                    *current = value;
                }
            }
            Some(current) => {
                if !value.is_null() {
                    check(&field, Some(current.to_string()), Some(value.to_string()));
                }
            }
        }
    }

    report
}

/// Pure form of [`merge_into`]: returns the merged record.
pub fn merge(mut existing: Moto, incoming: Moto) -> Moto {
    merge_into(&mut existing, incoming);
    existing
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

fn display<T: Display>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(|v| v.to_string())
}

/// Insertion-ordered catalog keyed by record ID.
#[derive(Debug, Default)]
pub struct CatalogAssembler {
    motos: Vec<Moto>,
    index: HashMap<String, usize>,
}

impl CatalogAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record or merge it into the one with the same ID.
    pub fn insert(&mut self, moto: Moto) -> MergeOutcome {
        match self.index.get(&moto.id) {
            Some(&pos) => MergeOutcome::Merged(merge_into(&mut self.motos[pos], moto)),
            None => {
                self.index.insert(moto.id.clone(), self.motos.len());
                self.motos.push(moto);
                MergeOutcome::Created
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Moto> {
        self.index.get(id).map(|&pos| &self.motos[pos])
    }

    pub fn len(&self) -> usize {
        self.motos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motos.is_empty()
    }

    pub fn motos(&self) -> &[Moto] {
        &self.motos
    }

    /// Consume the assembler, yielding records in first-insertion order.
    pub fn into_motos(self) -> Vec<Moto> {
        self.motos
    }
}
