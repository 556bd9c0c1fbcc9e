// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod bot_api_test;
pub mod health_check;
pub mod helpers;
pub mod polling_cycle_test;
pub mod system_api_test;
pub mod workers_api_test;
