#![forbid(unsafe_code)]

//! Workspace configuration as data.
//!
//! The 2D control surface exposes its selections as plain enumerated
//! kebab-case strings; this module gives each an owned enum plus a
//! [`WorkspaceConfig`] that can be loaded from JSON at startup. Every
//! field has a default that matches the hardcoded behavior, so
//! `WorkspaceConfig::default()` is always a valid configuration.
//!
//! # Failure Modes
//!
//! Config parsing is the only fallible surface in the core: an
//! unrecognized option string yields [`UnknownOption`] naming the
//! field and the offending value. Everything downstream of a parsed
//! config clamps or defaults instead of erroring.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error for an option string the control surface does not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    /// Which configuration field was being parsed.
    pub field: &'static str,
    /// The value that failed to parse.
    pub value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} option: {:?}", self.field, self.value)
    }
}

impl std::error::Error for UnknownOption {}

macro_rules! control_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All recognized variants, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// The control-surface tag for this variant.
            #[must_use]
            pub const fn tag(self) -> &'static str {
                match self {
                    $( $name::$variant => $tag, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.tag())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $tag => Ok($name::$variant), )+
                    other => Err(UnknownOption {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

control_enum! {
    /// Where inactive artifact boards go.
    PlacementMode, "visualization" {
        /// Bounded-column grid beside the stage.
        #[default]
        Sidebar => "sidebar",
        /// Thin strips stacked above the data grid.
        Tabs => "tabs",
        /// Category clusters along an arc behind the grid.
        Grouping => "grouping",
        /// Alternating left/right rings around the stage.
        Gallery => "gallery",
    }
}

control_enum! {
    /// How new analysis runs are requested on the grid.
    InteractionMode, "interaction" {
        /// A persistent overlay control.
        #[default]
        Overlay => "overlay",
        /// A context menu anchored at the pointer's world point.
        ContextMenu => "contextual-menu",
    }
}

control_enum! {
    /// How an artifact's pending phase is revealed.
    ProgressMode, "progress" {
        /// Creation yields a complete artifact with no pending phase.
        #[default]
        Immediate => "none",
        /// The complete artifact appears after a fixed simulated delay.
        FixedDelay => "fixed-delay",
        /// A pending artifact streams progress in fixed steps to 1.0.
        Streaming => "streaming",
    }
}

control_enum! {
    /// What the grid's size handle edits.
    GridEditMode, "grid-edit" {
        /// Change the logical row/column counts in cell increments.
        #[default]
        Resize => "resize",
        /// Hold counts fixed; mask rendered cells with a clip rectangle.
        Clip => "clip",
    }
}

/// Every control-surface switch in one loadable struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Placement strategy for inactive artifacts.
    pub placement: PlacementMode,
    /// Run-request interaction on the grid surface.
    pub interaction: InteractionMode,
    /// Pending-phase reveal policy.
    pub progress: ProgressMode,
    /// Size-handle behavior on the grid surface.
    pub grid_edit: GridEditMode,
}

impl WorkspaceConfig {
    /// Load a config from a JSON string. Missing fields default.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
