//! Reference resolution inside calculated-field formulas.
//!
//! Formulas refer to other calculations and to parameters by internal name
//! (`[Calculation_1459014788743806976]`, `[Parameters].[Parameter 1]`).
//! Three rewrites are offered:
//!
//! - [`ReferenceResolver::resolve_formula`] expands every reference until no
//!   known internal name is left: parameters become `[caption]`, calculations
//!   become their own formula text, which may in turn contain references.
//! - [`ReferenceResolver::rename_formula`] replaces each internal name with
//!   `[caption]` in a single pass.
//! - [`ReferenceResolver::resolve_names`] replaces each internal name with
//!   the bare caption in a single pass, for display labels.
//!
//! ## Termination
//!
//! A replacement is only applied when it differs from the name it replaces,
//! so an entity never substitutes itself. Mutual references (A uses B, B
//! uses A) still never settle, so expansion is capped at a number of passes.
//! An acyclic chain over `n` entities needs at most `n` changing passes plus
//! one quiet pass, which is the default cap.
//!
//! A cycle whose members mention each other more than once grows the text
//! geometrically within a single pass, so the pass cap alone does not bound
//! the output. Expansion also stops before any replacement that would take
//! the text past `(total expansion length + 1) * (entity count + 1)` bytes.
//!
//! Either way, a result counts as converged only when no expandable
//! internal name is left in the text.


use crate::base::{DiagnosticKind, Diagnostics};
use crate::extract::{Calculation, WorksheetColumn};

/// Pseudo data source that holds workbook parameters.
pub const PARAMETERS_DATASOURCE: &str = "Parameters";

/// A referenceable entity, snapshotted from a calculation record.
#[derive(Clone, Debug)]
struct Entity {
    name: String,
    caption: String,
    /// Text that replaces `name` during expansion, or `None` when the
    /// replacement would equal the name.
    expansion: Option<String>,
}

impl Entity {
    fn from_calculation(calculation: &Calculation) -> Self {
        let bracketed = format!("[{}]", calculation.caption);
        let is_parameter = calculation.datasource == PARAMETERS_DATASOURCE;
        let self_referential = (is_parameter && calculation.name == bracketed)
            || calculation.name == calculation.calculation;
        let expansion = if self_referential {
            None
        } else if is_parameter {
            Some(bracketed)
        } else {
            Some(calculation.calculation.clone())
        };
        Self {
            name: calculation.name.clone(),
            caption: calculation.caption.clone(),
            expansion,
        }
    }
}

/// Outcome of expanding one formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    /// Number of scan-and-replace passes performed.
    pub passes: usize,
    /// `false` when a bound was hit with expandable names still in the text.
    pub converged: bool,
}

/// Rewrites internal names found in formula text.
#[derive(Clone, Debug)]
pub struct ReferenceResolver {
    entities: Vec<Entity>,
    max_passes: usize,
    max_len: usize,
}

impl ReferenceResolver {
    /// Build a resolver over every calculation known so far.
    pub fn new(calculations: &[Calculation]) -> Self {
        let entities: Vec<Entity> = calculations
            .iter()
            .filter(|c| !c.name.is_empty())
            .map(Entity::from_calculation)
            .collect();
        let max_passes = entities.len() + 1;
        let expansion_len: usize = entities
            .iter()
            .filter_map(|e| e.expansion.as_ref().map(String::len))
            .sum();
        let max_len = (expansion_len + 1) * (entities.len() + 1);
        Self {
            entities,
            max_passes,
            max_len,
        }
    }

    /// Override the pass cap. `None` keeps the default of entity count + 1.
    pub fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        if let Some(max) = max_passes {
            self.max_passes = max.max(1);
        }
        self
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Largest text, in bytes, that expansion may produce.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Expand references until a pass changes nothing or a bound is reached.
    pub fn resolve_formula(&self, text: &str) -> Resolution {
        let limit = self.max_len.max(text.len());
        let mut text = text.to_string();
        let mut passes = 0;

        loop {
            if passes >= self.max_passes {
                let converged = !self.has_pending(&text);
                return Resolution {
                    text,
                    passes,
                    converged,
                };
            }
            passes += 1;

            let mut changed = false;
            for entity in &self.entities {
                let Some(expansion) = &entity.expansion else {
                    continue;
                };
                let count = text.matches(entity.name.as_str()).count();
                if count == 0 {
                    continue;
                }
                let grown = text.len() - count * entity.name.len() + count * expansion.len();
                if grown > limit {
                    return Resolution {
                        text,
                        passes,
                        converged: false,
                    };
                }
                text = text.replace(entity.name.as_str(), expansion);
                changed = true;
            }

            if !changed {
                return Resolution {
                    text,
                    passes,
                    converged: true,
                };
            }
        }
    }

    fn has_pending(&self, text: &str) -> bool {
        self.entities
            .iter()
            .any(|e| e.expansion.is_some() && text.contains(e.name.as_str()))
    }

    /// Replace internal names with `[caption]`, one pass, no expansion.
    pub fn rename_formula(&self, text: &str) -> String {
        self.entities.iter().fold(text.to_string(), |acc, entity| {
            acc.replace(entity.name.as_str(), &format!("[{}]", entity.caption))
        })
    }

    /// Replace internal names with the bare caption, one pass, no expansion.
    pub fn resolve_names(&self, text: &str) -> String {
        self.entities.iter().fold(text.to_string(), |acc, entity| {
            acc.replace(entity.name.as_str(), &entity.caption)
        })
    }

    fn expand_logged(&self, text: &str, subject: &str, diagnostics: &mut Diagnostics) -> String {
        let resolution = self.resolve_formula(text);
        let reported = diagnostics
            .of_kind(DiagnosticKind::UnresolvedReference)
            .any(|d| d.subject == subject);
        if !resolution.converged && !reported {
            diagnostics.push(
                DiagnosticKind::UnresolvedReference,
                subject,
                format!(
                    "references left after {} passes; keeping partial result",
                    resolution.passes
                ),
            );
        }
        resolution.text
    }
}

/// Fill `calc_resolved` and `calc_renamed` for every calculation.
///
/// Each calculation restarts from its raw formula, so running this again
/// after more calculations are appended gives the same result as running it
/// once over the final list. A calculation that fails to converge is reported
/// once, however many times it is resolved.
pub fn resolve_calculations(
    calculations: &mut [Calculation],
    max_passes: Option<usize>,
    diagnostics: &mut Diagnostics,
) {
    let resolver = ReferenceResolver::new(calculations).with_max_passes(max_passes);
    for calculation in calculations.iter_mut() {
        let subject = format!("{} {}", calculation.datasource, calculation.name);
        calculation.calc_resolved =
            resolver.expand_logged(&calculation.calculation, &subject, diagnostics);
        calculation.calc_renamed = resolver.rename_formula(&calculation.calculation);
    }
}

/// Fill `calc_resolved` and `name_resolved` for worksheet field usages.
pub fn resolve_worksheet_columns(
    usages: &mut [WorksheetColumn],
    calculations: &[Calculation],
    max_passes: Option<usize>,
    diagnostics: &mut Diagnostics,
) {
    let resolver = ReferenceResolver::new(calculations).with_max_passes(max_passes);
    for usage in usages.iter_mut() {
        let subject = format!("{} {}", usage.worksheet, usage.name);
        usage.calc_resolved = resolver.expand_logged(&usage.calculation, &subject, diagnostics);
        usage.name_resolved = resolver.resolve_names(&usage.name);
    }
}
