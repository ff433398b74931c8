//! Attribute injection for vendor-defined platform structures.
//!
//! Shared option code cannot know the field layout of every vendor platform
//! ahead of time. Instead of reflective field writes, each platform exposes
//! its injectable fields as named, typed slots via [`AttributeSink`];
//! [`inject_attribute`] looks a slot up by exact name and assigns into it,
//! failing loudly when the name is unknown or the value shape does not fit.
//!
//! [`PlatformArgs`] is the shared slice of that surface — the two attributes
//! every vendor platform is expected to carry. Vendor structs embed it and
//! delegate their [`AttributeSink`] impl to it, extending with their own
//! slots where needed.

use std::collections::HashMap;

use regex::Regex;

use crate::error::CfgError;

// =============================================================================
// Attribute Values & Slots
// =============================================================================

/// A typed value routed to a named platform attribute.
#[derive(Debug, Clone)]
pub enum AttrValue {
    /// A compiled pattern, e.g. for version extraction.
    Pattern(Regex),
    /// A datastore-source to retrieval-command mapping.
    CommandMap(HashMap<String, String>),
    /// Free-form text.
    Text(String),
    /// A boolean toggle.
    Flag(bool),
}

impl AttrValue {
    /// Kind name used in mismatch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pattern(_) => "pattern",
            Self::CommandMap(_) => "command map",
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
        }
    }
}

/// Mutable view of one named attribute slot on a platform structure.
pub enum AttrSlot<'a> {
    /// Slot accepting [`AttrValue::Pattern`].
    Pattern(&'a mut Option<Regex>),
    /// Slot accepting [`AttrValue::CommandMap`].
    CommandMap(&'a mut HashMap<String, String>),
    /// Slot accepting [`AttrValue::Text`].
    Text(&'a mut String),
    /// Slot accepting [`AttrValue::Flag`].
    Flag(&'a mut bool),
}

impl AttrSlot<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Pattern(_) => "pattern",
            Self::CommandMap(_) => "command map",
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
        }
    }
}

// =============================================================================
// Attribute Sink
// =============================================================================

/// Implemented by platform structures that accept attribute injection.
pub trait AttributeSink {
    /// Type name reported in diagnostics when injection fails.
    fn sink_name(&self) -> &'static str;

    /// Looks up the slot whose name exactly equals `name`.
    ///
    /// Returning `None` means the structure has no such attribute; the
    /// injector turns that into [`CfgError::InvalidPlatformAttribute`]
    /// rather than inventing a field.
    fn attribute(&mut self, name: &str) -> Option<AttrSlot<'_>>;
}

/// Shared attribute surface embedded by vendor platform structs.
#[derive(Debug, Clone, Default)]
pub struct PlatformArgs {
    /// Pattern used to extract the software version from device output.
    pub version_pattern: Option<Regex>,
    /// Mapping from datastore-source name to the command that retrieves it.
    pub config_command_map: HashMap<String, String>,
}

impl AttributeSink for PlatformArgs {
    fn sink_name(&self) -> &'static str {
        "PlatformArgs"
    }

    fn attribute(&mut self, name: &str) -> Option<AttrSlot<'_>> {
        match name {
            "version_pattern" => Some(AttrSlot::Pattern(&mut self.version_pattern)),
            "config_command_map" => Some(AttrSlot::CommandMap(&mut self.config_command_map)),
            _ => None,
        }
    }
}

// =============================================================================
// Injection
// =============================================================================

/// Assigns `value` into the attribute named `name` on `sink`.
///
/// Fails with [`CfgError::InvalidPlatformAttribute`] when no slot matches
/// the name, and [`CfgError::AttributeTypeMismatch`] when the value's shape
/// does not fit the slot. In both failure cases the sink is left untouched.
pub fn inject_attribute(
    sink: &mut dyn AttributeSink,
    name: &str,
    value: AttrValue,
) -> Result<(), CfgError> {
    let platform = sink.sink_name();

    let Some(slot) = sink.attribute(name) else {
        return Err(CfgError::InvalidPlatformAttribute {
            attribute: name.to_string(),
            platform,
        });
    };

    let expected = slot.kind();
    match (slot, value) {
        (AttrSlot::Pattern(field), AttrValue::Pattern(pattern)) => *field = Some(pattern),
        (AttrSlot::CommandMap(field), AttrValue::CommandMap(map)) => *field = map,
        (AttrSlot::Text(field), AttrValue::Text(text)) => *field = text,
        (AttrSlot::Flag(field), AttrValue::Flag(flag)) => *field = flag,
        (_, value) => {
            return Err(CfgError::AttributeTypeMismatch {
                attribute: name.to_string(),
                platform,
                expected,
                actual: value.kind(),
            });
        }
    }

    Ok(())
}
