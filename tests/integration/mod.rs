//! Integration tests driving the `monorail` binary against real git repositories

mod helpers;
mod test_affected;
