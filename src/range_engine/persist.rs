//! Versioned JSON persistence for the range store.
//!
//! The wire shape is the nested `{version, rangesByMode, depths}` document
//! the presentation layer writes to local storage and to export files:
//!
//! ```json
//! {
//!   "version": 2,
//!   "rangesByMode": { "3MAX": { "15bb": { "BB": { "BTN:RAISE,SB:CALL": { "AA": "SHOVE" } } } } },
//!   "depths": [25, 24, 5]
//! }
//! ```
//!
//! Loading tolerates the legacy v1 `{ranges, depths}` shape (no mode
//! dimension) by placing the ranges under the 3-max key. Malformed input is
//! rejected without touching any existing state; corrupt stored state falls
//! back to empty defaults with a warning rather than failing startup.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::range_engine::combos::RangeMap;
use crate::range_engine::context::ContextKey;
use crate::range_engine::models::{Position, TableMode};
use crate::range_engine::store::{RangeStore, StoreKey};

/// Current persisted-state version.
pub const STATE_VERSION: u32 = 2;

/// Default stack-depth list: 25bb down to 5bb.
pub fn default_depths() -> Vec<u32> {
    (5..=25).rev().collect()
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

type ContextRanges = BTreeMap<ContextKey, RangeMap>;
type PositionRanges = BTreeMap<Position, ContextRanges>;
/// Depth-keyed ("25bb") ranges for one table mode — also the legacy v1
/// top-level `ranges` value.
type ModeRanges = BTreeMap<String, PositionRanges>;
type RangesWire = BTreeMap<TableMode, ModeRanges>;

fn depth_key(depth: u32) -> String {
    format!("{depth}bb")
}

fn parse_depth_key(key: &str) -> Result<u32, String> {
    key.strip_suffix("bb")
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| format!("bad depth key {key:?} (expected e.g. \"25bb\")"))
}

impl RangeStore {
    fn to_wire(&self) -> RangesWire {
        let mut wire = RangesWire::new();
        for (key, map) in self.leaves() {
            wire.entry(key.mode)
                .or_default()
                .entry(depth_key(key.depth))
                .or_default()
                .entry(key.position)
                .or_default()
                .insert(key.context.clone(), map.clone());
        }
        wire
    }

    fn from_wire(wire: RangesWire) -> Result<RangeStore, String> {
        let mut store = RangeStore::new();
        for (mode, by_depth) in wire {
            store.absorb_mode_wire(mode, by_depth)?;
        }
        Ok(store)
    }

    fn absorb_mode_wire(&mut self, mode: TableMode, by_depth: ModeRanges) -> Result<(), String> {
        for (depth_str, by_position) in by_depth {
            let depth = parse_depth_key(&depth_str)?;
            for (position, by_context) in by_position {
                for (context, map) in by_context {
                    self.insert_leaf(StoreKey { mode, depth, position, context }, map);
                }
            }
        }
        Ok(())
    }
}

impl Serialize for RangeStore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RangeStore {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = RangesWire::deserialize(deserializer)?;
        RangeStore::from_wire(wire).map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SavedState
// ---------------------------------------------------------------------------

/// The whole persisted document: store plus the configured depth list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(rename = "rangesByMode")]
    pub ranges_by_mode: RangeStore,
    #[serde(default = "default_depths")]
    pub depths: Vec<u32>,
}

fn current_version() -> u32 {
    STATE_VERSION
}

impl SavedState {
    /// Empty store, default depth list.
    pub fn empty() -> SavedState {
        SavedState {
            version: STATE_VERSION,
            ranges_by_mode: RangeStore::new(),
            depths: default_depths(),
        }
    }

    /// Parse persisted or imported JSON. Accepts the current v2 shape and
    /// the legacy v1 `{ranges, depths}` shape (migrated under 3-max).
    /// Anything else is rejected; the caller's state is never touched.
    pub fn from_json(text: &str) -> Result<SavedState, ImportError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let obj = value.as_object().ok_or(ImportError::NotAnObject)?;

        let mut state = if obj.contains_key("rangesByMode") {
            serde_json::from_value::<SavedState>(value)?
        } else if let Some(ranges) = obj.get("ranges") {
            let by_depth: ModeRanges = serde_json::from_value(ranges.clone())?;
            let mut store = RangeStore::new();
            store
                .absorb_mode_wire(TableMode::ThreeMax, by_depth)
                .map_err(ImportError::BadShape)?;
            let depths = match obj.get("depths") {
                Some(d) => serde_json::from_value(d.clone())?,
                None => default_depths(),
            };
            SavedState { version: 1, ranges_by_mode: store, depths }
        } else {
            return Err(ImportError::MissingRanges);
        };

        if state.depths.is_empty() {
            state.depths = default_depths();
        }
        Ok(state)
    }

    /// Serialize to the export/local-storage document (pretty-printed, like
    /// the files users already have).
    pub fn to_json(&self) -> serde_json::Result<String> {
        let canonical = SavedState { version: STATE_VERSION, ..self.clone() };
        serde_json::to_string_pretty(&canonical)
    }
}

/// Load previously stored state, falling back to empty defaults when the
/// stored text is absent or corrupt. Startup must never fail on bad state.
pub fn load_or_default(raw: Option<&str>) -> SavedState {
    let Some(raw) = raw else {
        return SavedState::empty();
    };
    match SavedState::from_json(raw) {
        Ok(state) => state,
        Err(err) => {
            log::warn!("stored trainer state is unreadable ({err}); starting empty");
            SavedState::empty()
        }
    }
}

/// Export file name with an embedded timestamp (milliseconds since epoch).
pub fn export_file_name(timestamp_millis: u64) -> String {
    format!("preflop-ranges-{timestamp_millis}.json")
}

/// Why an import was rejected. The in-memory store stays as it was.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import is not a JSON object")]
    NotAnObject,
    #[error("import holds no range data (expected `rangesByMode` or `ranges`)")]
    MissingRanges,
    #[error("unreadable range data: {0}")]
    BadShape(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
