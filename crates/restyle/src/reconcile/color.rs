//! Paint style reconciliation.
//!
//! Only the first SOLID paint of a style is read or replaced. Every other
//! paint keeps its position and content.

use super::field::{classify, Governance};
use super::rename::RenameEdit;
use super::Prepared;
use crate::broadcast::Broadcast;
use crate::convert::{parse_hex, Hsl, NormalizedRgb};
use crate::error::ReconcileError;
use crate::host::DocumentHost;
use crate::model::{Paint, PaintStyleRecord, PaintStyleUpdate, SolidPaint, VariableId, VariableType};

/// The color part of an update command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorEdit {
    pub rename: RenameEdit,
    pub hue: Option<Broadcast>,
    pub saturation: Option<Broadcast>,
    pub lightness: Option<Broadcast>,
    /// Opacity in `0..=1`.
    pub alpha: Option<Broadcast>,
    /// Takes precedence over hue, saturation, and lightness.
    pub hex: Option<Broadcast>,
    pub use_color_variable: bool,
    pub color_variable_id: Option<VariableId>,
}

impl ColorEdit {
    fn number(
        value: &Option<Broadcast>,
        field: &'static str,
        index: usize,
        total: usize,
    ) -> Result<Option<f64>, ReconcileError> {
        match value {
            Some(value) => value.number(field, index, total),
            None => Ok(None),
        }
    }

    fn alpha(&self, index: usize, total: usize) -> Result<Option<f64>, ReconcileError> {
        Ok(Self::number(&self.alpha, "alpha", index, total)?.map(|a| a.clamp(0.0, 1.0)))
    }

    /// The variable to bind, when variable mode is on and an id was given.
    fn variable(&self) -> Option<&VariableId> {
        self.color_variable_id
            .as_ref()
            .filter(|id| self.use_color_variable && !id.is_empty())
    }

    /// The new color for this slot, or `None` when no color was requested.
    fn color(
        &self,
        current: NormalizedRgb,
        index: usize,
        total: usize,
    ) -> Result<Option<NormalizedRgb>, ReconcileError> {
        if let Some(hex) = self.hex.as_ref().and_then(|h| h.slot(index, total)) {
            return parse_hex(&hex)
                .map(Some)
                .map_err(|_| ReconcileError::InvalidColor { value: hex });
        }

        let hue = Self::number(&self.hue, "hue", index, total)?;
        let saturation = Self::number(&self.saturation, "saturation", index, total)?;
        let lightness = Self::number(&self.lightness, "lightness", index, total)?;
        if hue.is_none() && saturation.is_none() && lightness.is_none() {
            return Ok(None);
        }

        let mut hsl = Hsl::from_normalized(current);
        if let Some(h) = hue {
            hsl.h = h;
        }
        if let Some(s) = saturation {
            hsl.s = s;
        }
        if let Some(l) = lightness {
            hsl.l = l;
        }
        Ok(Some(hsl.to_normalized()))
    }
}

/// Reconciles `style`, the `index`-th of `total` selected styles.
pub async fn prepare_color<H: DocumentHost + ?Sized>(
    host: &H,
    style: &PaintStyleRecord,
    edit: &ColorEdit,
    index: usize,
    total: usize,
) -> Result<Prepared<PaintStyleUpdate>, ReconcileError> {
    log::debug!("reconciling paint style {} ({})", style.id, style.name);

    let (position, current) = style.first_solid().ok_or(ReconcileError::NoSolidPaint)?;
    let mut skipped = Vec::new();

    let replacement = match edit.variable() {
        Some(id) => {
            let lookup = host.variable_by_id(id).await;
            match classify("color", VariableType::Color, id, lookup) {
                Governance::Bind(id) => {
                    let opacity = edit.alpha(index, total)?.unwrap_or(current.opacity);
                    Some(SolidPaint {
                        opacity,
                        ..current.clone()
                    }
                    .bound_to(id))
                }
                Governance::Skip(skip) => {
                    skipped.push(skip);
                    None
                }
                _ => None,
            }
        }
        None => {
            let color = edit.color(current.color, index, total)?;
            let alpha = edit.alpha(index, total)?;
            match (color, alpha) {
                (None, None) => None,
                (Some(color), alpha) => Some(SolidPaint {
                    color,
                    opacity: alpha.unwrap_or(current.opacity),
                    visible: current.visible,
                    bound_variables: Default::default(),
                }),
                (None, Some(opacity)) => Some(SolidPaint {
                    opacity,
                    ..current.clone()
                }),
            }
        }
    };

    let paints = replacement.map(|paint| {
        let mut paints = style.paints.clone();
        paints[position] = Paint::Solid(paint);
        paints
    });

    let update = PaintStyleUpdate {
        name: edit.rename.rename(&style.name),
        description: edit.rename.description(),
        paints,
    };
    Ok(Prepared { update, skipped })
}
