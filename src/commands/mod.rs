// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod balances;
pub mod expenses;
pub mod exporter;
pub mod members;
pub mod settle;
pub mod tasks;
