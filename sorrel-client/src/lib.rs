// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

mod client;

pub use client::AnnotationClient;
pub use client::CreateOutcome;
pub use client::User;
