/*! Integration tests for Templar.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - ordered: Tests for OrderedMap ordering and reordering
 * - path: Tests for the path grammar, both parsers and Display round trips
 * - container: Tests for direct access, path navigation, observers and the wire format
 * - instance: Tests for override recording, materialization, diffing and write modes
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("templar=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod container;
mod helpers;
mod path;
