// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod session;
pub mod settings;
pub mod months;
pub mod items;
pub mod finance;
pub mod reports;
pub mod exporter;
pub mod doctor;
