//! Integration test harness for the mesero workspace; see `tests/`.
