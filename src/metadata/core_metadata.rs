//! Parser for core metadata documents (`METADATA` in dist-info, `PKG-INFO` in egg-info)
//!
//! Only the header block is read. It ends at the first blank line; anything
//! after that is the long description.

/// Header fields needed for version reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl CoreMetadata {
    pub fn parse(content: &str) -> Self {
        let mut metadata = Self::default();

        for line in content.lines() {
            if line.trim().is_empty() {
                break;
            }

            // Folded continuation of the previous header
            if line.starts_with([' ', '\t']) {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };

            let value = value.trim();
            if key.eq_ignore_ascii_case("name") && metadata.name.is_none() {
                metadata.name = Some(value.to_string());
            } else if key.eq_ignore_ascii_case("version") && metadata.version.is_none() {
                metadata.version = Some(value.to_string());
            }
        }

        metadata
    }
}
