//! Icon name to code point lookup.

use log::debug;

use crate::code::decode_icon_code;
use crate::error::ResolveError;
use crate::stylesheet::StyleRule;

/// Custom property carrying the glyph of an icon class.
pub const ICON_CODE_PROPERTY: &str = "--fa";

/// Prefix of icon class selectors.
pub const ICON_CLASS_PREFIX: &str = ".fa-";

/// Find the code point of `icon` in `rules`.
///
/// Rules are scanned in document order and the first one that selects
/// `.fa-{icon}` and carries a decodable `--fa` declaration wins. Rules that
/// match but lack the declaration, or whose value does not decode, are
/// passed over.
pub fn resolve(rules: &[StyleRule], icon: &str) -> Result<char, ResolveError> {
    let selector = format!("{ICON_CLASS_PREFIX}{icon}");
    let mut first_failure = None;

    for rule in rules.iter().filter(|rule| rule.selects(&selector)) {
        let Some(declaration) = rule.declaration(ICON_CODE_PROPERTY) else {
            debug!("{selector} rule without {ICON_CODE_PROPERTY}, continuing");
            continue;
        };

        match decode_icon_code(&declaration.value) {
            Ok(code_point) => {
                debug!("resolved {selector} to U+{:04X}", u32::from(code_point));
                return Ok(code_point);
            }
            Err(source) => {
                debug!("{selector} has undecodable code {}: {source}", declaration.value);
                first_failure.get_or_insert((declaration.value.clone(), source));
            }
        }
    }

    Err(match first_failure {
        Some((token, source)) => ResolveError::InvalidIconCode {
            icon: icon.to_owned(),
            token,
            source,
        },
        None => ResolveError::IconNotFound { icon: icon.to_owned() },
    })
}
