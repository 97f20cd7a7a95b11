//! Extra transformation stages triggered by awaken skills.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::game::GameData;
use crate::record::CostumePreset;
use crate::skills::AWAKEN_UNSET;
use crate::{ConvertError, Result};

/// Awaken skill without a transformation group.
pub const PARTSET_NONE: u16 = 0xFFFF;

/// Stage count meaning exactly one stage.
pub const SINGLE_STAGE: u32 = 0xFFFF_FFFF;

/// Part-set ids of the default playable-race transformation chain.
pub const DEFAULT_CHAIN_RANGES: [RangeInclusive<u16>; 2] = [100..=102, 297..=299];

/// Part set of the third default-chain stage, whose skeleton needs linking.
pub const THIRD_STAGE_PARTSET: u16 = 102;

/// Whether a part-set id belongs to the default transformation chain.
pub fn is_default_chain(id: u16) -> bool {
    DEFAULT_CHAIN_RANGES.iter().any(|range| range.contains(&id))
}

/// One transformation stage to copy into the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformationRequest {
    pub base_partset: u16,
    pub stage: u16,
    /// Costume index of the preset that triggered the stage.
    pub preset_index: u32,
}

impl TransformationRequest {
    /// Part-set id of this stage.
    pub fn target(&self) -> u16 {
        self.base_partset + self.stage
    }
}

/// Ordered, deduplicated stage requests across all presets.
#[derive(Debug, Clone, Default)]
pub struct TransformationCollector {
    requests: Vec<TransformationRequest>,
}

impl TransformationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the stages a preset's awaken skill transforms through.
    ///
    /// Returns the number of requests queued. Groups of the default chain
    /// and groups already queued by an earlier preset queue nothing.
    pub fn collect<G: GameData + ?Sized>(
        &mut self,
        game: &G,
        preset: &CostumePreset,
        preset_index: u32,
    ) -> Result<usize> {
        if preset.awaken_skill >= AWAKEN_UNSET {
            return Ok(0);
        }
        let Some(awaken) = game.awaken_skill(preset.awaken_skill) else {
            debug!("Awaken skill {} has no transformation data", preset.awaken_skill);
            return Ok(0);
        };
        let base = awaken.partset;
        if base == PARTSET_NONE || is_default_chain(base) {
            return Ok(0);
        }
        if self.requests.iter().any(|r| r.target() == base) {
            debug!("Transformation group {} already queued", base);
            return Ok(0);
        }

        let stages = if awaken.num_transforms == SINGLE_STAGE {
            1
        } else {
            awaken.num_transforms
        };

        let mut queued = Vec::new();
        for stage in 0..stages {
            let target = u16::try_from(stage)
                .ok()
                .and_then(|s| base.checked_add(s))
                .filter(|&id| id != PARTSET_NONE);
            let Some(target) = target else {
                return Err(ConvertError::mapping(format!(
                    "transformation group {} with {} stages exceeds the part-set id range",
                    base, stages
                )));
            };
            queued.push(TransformationRequest {
                base_partset: base,
                stage: target - base,
                preset_index,
            });
        }

        let count = queued.len();
        self.requests.extend(queued);
        Ok(count)
    }

    pub fn requests(&self) -> &[TransformationRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
