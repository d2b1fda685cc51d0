//! ShardPacker: greedy sequential packing under a compressed-size ceiling.
//!
//! Units are appended to the open shard in production order. Whenever the
//! open payload might exceed the ceiling it is compressed for real; if it
//! does exceed, the last unit is taken back out, the shard is sealed, and
//! that unit opens the next shard.

use std::collections::VecDeque;

use lighthouse_core::config::ShardConfig;
use lighthouse_core::errors::{LighthouseError, PackError};
use lighthouse_core::models::{ContentUnit, Shard};
use lighthouse_observability::shard_span;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{codec, merkle};

/// Why a unit was left out of every shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackFailureKind {
    /// Compresses to more than the ceiling on its own.
    Oversized,
    /// Serialization or compression kept failing past `max_pack_attempts`.
    Exhausted,
}

/// A unit dropped during packing. Distinct from generation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackFailure {
    pub unit_id: String,
    pub kind: PackFailureKind,
    pub attempts: u32,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct PackOutcome {
    pub shards: Vec<Shard>,
    pub dropped: Vec<PackFailure>,
}

impl PackOutcome {
    pub fn unit_count(&self) -> usize {
        self.shards.iter().map(Shard::unit_count).sum()
    }
}

#[derive(Debug, Clone)]
pub struct ShardPacker {
    byte_ceiling: usize,
    compression_level: i32,
    max_pack_attempts: u32,
}

impl ShardPacker {
    pub fn new(config: &ShardConfig) -> Self {
        Self {
            byte_ceiling: config.byte_ceiling,
            compression_level: config.compression_level,
            max_pack_attempts: config.max_pack_attempts.max(1),
        }
    }

    pub fn byte_ceiling(&self) -> usize {
        self.byte_ceiling
    }

    /// Pack `units` into shards numbered from 0.
    ///
    /// Every input unit ends up in exactly one shard or in `dropped`.
    pub fn pack(&self, units: &[ContentUnit]) -> PackOutcome {
        let mut run = PackRun::new(self, units);
        run.drive();
        let outcome = PackOutcome {
            shards: run.shards,
            dropped: run.dropped,
        };
        info!(
            input = units.len(),
            shards = outcome.shards.len(),
            packed = outcome.unit_count(),
            dropped = outcome.dropped.len(),
            "packing complete"
        );
        outcome
    }
}

struct Pending<'u> {
    unit: &'u ContentUnit,
    attempts: u32,
}

struct Entry<'u> {
    unit: &'u ContentUnit,
    attempts: u32,
    line: Vec<u8>,
}

/// Mutable state of one `pack` call.
struct PackRun<'p, 'u> {
    packer: &'p ShardPacker,
    pending: VecDeque<Pending<'u>>,
    /// Units that failed in the open shard; retried at the start of the next.
    deferred: Vec<Pending<'u>>,
    open: Vec<Entry<'u>>,
    open_raw: usize,
    /// `(raw_len, compressed_len)` of the last real compression of the open shard.
    checkpoint: Option<(usize, usize)>,
    shards: Vec<Shard>,
    dropped: Vec<PackFailure>,
}

impl<'p, 'u> PackRun<'p, 'u> {
    fn new(packer: &'p ShardPacker, units: &'u [ContentUnit]) -> Self {
        Self {
            packer,
            pending: units
                .iter()
                .map(|unit| Pending { unit, attempts: 0 })
                .collect(),
            deferred: Vec::new(),
            open: Vec::new(),
            open_raw: 0,
            checkpoint: None,
            shards: Vec::new(),
            dropped: Vec::new(),
        }
    }

    fn drive(&mut self) {
        loop {
            if let Some(item) = self.pending.pop_front() {
                self.push(item);
            } else if !self.open.is_empty() {
                self.seal();
            } else if !self.deferred.is_empty() {
                self.release_deferred();
            } else {
                break;
            }
        }
    }

    fn push(&mut self, item: Pending<'u>) {
        let line = match codec::encode_line(item.unit) {
            Ok(line) => line,
            Err(e) => return self.defer(item, &e),
        };
        self.open_raw += line.len();
        self.open.push(Entry {
            unit: item.unit,
            attempts: item.attempts,
            line,
        });

        if !self.may_exceed_ceiling() {
            return;
        }
        match codec::compress(&self.open_payload(), self.packer.compression_level) {
            Ok(compressed) if compressed.len() <= self.packer.byte_ceiling => {
                self.checkpoint = Some((self.open_raw, compressed.len()));
            }
            Ok(compressed) => {
                let Some(last) = self.pop_open() else { return };
                if self.open.is_empty() {
                    self.drop_oversized(last, compressed.len());
                } else {
                    debug!(unit_id = %last.unit.id, "ceiling reached, sealing shard");
                    self.pending.push_front(last);
                    self.seal();
                }
            }
            Err(e) => {
                if let Some(last) = self.pop_open() {
                    self.defer(last, &e);
                }
            }
        }
    }

    /// Whether the open payload could compress to more than the ceiling.
    /// `seal` re-checks the real size regardless.
    fn may_exceed_ceiling(&self) -> bool {
        let estimate = match self.checkpoint {
            Some((raw, compressed)) => compressed + codec::compress_bound(self.open_raw - raw),
            None => codec::compress_bound(self.open_raw),
        };
        estimate > self.packer.byte_ceiling
    }

    fn open_payload(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(self.open_raw);
        for entry in &self.open {
            raw.extend_from_slice(&entry.line);
        }
        raw
    }

    fn pop_open(&mut self) -> Option<Pending<'u>> {
        let entry = self.open.pop()?;
        self.open_raw -= entry.line.len();
        self.checkpoint = None;
        Some(Pending {
            unit: entry.unit,
            attempts: entry.attempts,
        })
    }

    /// Compress and seal the open shard, shrinking it from the end until it
    /// fits under the ceiling.
    fn seal(&mut self) {
        while !self.open.is_empty() {
            let raw = self.open_payload();
            match codec::compress(&raw, self.packer.compression_level) {
                Ok(compressed) if compressed.len() <= self.packer.byte_ceiling => {
                    self.emit(raw.len(), compressed);
                    break;
                }
                Ok(compressed) => {
                    let Some(last) = self.pop_open() else { break };
                    if self.open.is_empty() {
                        self.drop_oversized(last, compressed.len());
                    } else {
                        self.pending.push_front(last);
                    }
                }
                Err(e) => {
                    if let Some(last) = self.pop_open() {
                        self.defer(last, &e);
                    }
                }
            }
        }
        self.open.clear();
        self.open_raw = 0;
        self.checkpoint = None;
        self.release_deferred();
    }

    fn emit(&mut self, raw_size: usize, compressed: Vec<u8>) {
        let sequence_index = self.shards.len() as u64;
        let span = shard_span!(sequence_index);
        let _enter = span.enter();

        let hashes: Vec<&str> = self
            .open
            .iter()
            .map(|e| e.unit.content_hash.as_str())
            .collect();
        let merkle_root = merkle::merkle_root(&hashes);
        let shard = Shard {
            id: format!("shard-{sequence_index:05}-{}", &merkle_root[..12]),
            sequence_index,
            byte_size: compressed.len(),
            raw_size,
            payload_hash: blake3::hash(&compressed).to_hex().to_string(),
            compressed_payload: compressed,
            merkle_root,
            unit_ids: self.open.iter().map(|e| e.unit.id.clone()).collect(),
        };
        info!(
            shard_id = %shard.id,
            units = shard.unit_count(),
            byte_size = shard.byte_size,
            raw_size = shard.raw_size,
            "shard sealed"
        );
        self.shards.push(shard);
    }

    /// Deferred units go to the front of the queue so they open the next shard.
    fn release_deferred(&mut self) {
        for item in self.deferred.drain(..).rev() {
            self.pending.push_front(item);
        }
    }

    fn defer(&mut self, mut item: Pending<'u>, error: &LighthouseError) {
        item.attempts += 1;
        if item.attempts >= self.packer.max_pack_attempts {
            warn!(
                unit_id = %item.unit.id,
                attempts = item.attempts,
                error = %error,
                "unit dropped from packing"
            );
            self.dropped.push(PackFailure {
                unit_id: item.unit.id.clone(),
                kind: PackFailureKind::Exhausted,
                attempts: item.attempts,
                reason: error.to_string(),
            });
        } else {
            debug!(unit_id = %item.unit.id, attempts = item.attempts, error = %error, "unit deferred");
            self.deferred.push(item);
        }
    }

    fn drop_oversized(&mut self, item: Pending<'u>, compressed_size: usize) {
        let error: LighthouseError = PackError::Oversized {
            unit_id: item.unit.id.clone(),
            compressed_size,
            ceiling: self.packer.byte_ceiling,
        }
        .into();
        warn!(unit_id = %item.unit.id, compressed_size, "unit exceeds shard ceiling on its own");
        self.dropped.push(PackFailure {
            unit_id: item.unit.id.clone(),
            kind: PackFailureKind::Oversized,
            attempts: item.attempts + 1,
            reason: error.to_string(),
        });
    }
}
