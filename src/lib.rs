// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod notice;
pub mod session;
pub mod sheets;
pub mod summary;
pub mod utils;
