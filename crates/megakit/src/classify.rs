//! Goal-map label classification.
//!
//! Maps a goal-map cell label to the entity it describes. The label
//! alphabet is `SPACE`, `POLYANET`, `{COLOR}_SOLOON` and
//! `{DIRECTION}_COMETH`; the attribute is the token before the first
//! underscore, lower-cased. Anything else is a classification error
//! that the caller reports and skips.

use crate::error::{Error, Result};
use crate::types::Entity;

/// Classify a goal-map cell label.
///
/// Returns `Ok(None)` for `SPACE` (no entity, no remote call),
/// `Ok(Some(entity))` for a recognized entity label, and
/// `Err(Error::UnknownEntity)` for anything else. Pure and
/// deterministic.
///
/// # Example
///
/// ```
/// use megakit::{classify, Entity};
///
/// assert_eq!(classify("SPACE").unwrap(), None);
/// assert_eq!(classify("POLYANET").unwrap(), Some(Entity::Polyanet));
/// assert_eq!(
///     classify("BLUE_SOLOON").unwrap(),
///     Some(Entity::Soloon { color: "blue".to_string() })
/// );
/// assert!(classify("GLORB").is_err());
/// ```
pub fn classify(label: &str) -> Result<Option<Entity>> {
    match label {
        "SPACE" => Ok(None),
        "POLYANET" => Ok(Some(Entity::Polyanet)),
        _ => match label.split_once('_') {
            Some((prefix, "SOLOON")) if !prefix.is_empty() => Ok(Some(Entity::Soloon {
                color: prefix.to_lowercase(),
            })),
            Some((prefix, "COMETH")) if !prefix.is_empty() => Ok(Some(Entity::Cometh {
                direction: prefix.to_lowercase(),
            })),
            _ => Err(Error::UnknownEntity {
                label: label.to_string(),
            }),
        },
    }
}
