// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Initial per-handle input buffer size in bytes
pub const DEFAULT_INPUT_CAPACITY: u32 = 1024;
/// Records a fresh offsets region can hold before `offsets_full` is raised
pub const DEFAULT_OFFSETS_CAPACITY: u32 = 32;
/// Guest error code for "a host callback failed" when the manifest omits it
pub const DEFAULT_CALLBACK_ERROR_CODE: u32 = 3;
/// Largest guest artifact the generator will read (16 MiB)
pub const MAX_ARTIFACT_SIZE: u64 = 16 * 1024 * 1024;
/// Name of the loader function the embedding variant rewrites
pub const LOADER_FUNCTION: &str = "load_guest_bytes";
/// Manifest flag selecting batched offsets dispatch
pub const FLAG_BATCH_OFFSETS: &str = "batch_offsets";
/// Manifest flag marking a debug build of the guest
pub const FLAG_DEBUG: &str = "debug";
