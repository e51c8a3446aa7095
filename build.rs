#![forbid(unsafe_code)]

fn main() {
    // Git metadata is unavailable when building from a source archive
    // rather than a work tree, so each setter is best effort.  Variables
    // that are not set here surface as None through option_env!.
    let _ = std::panic::catch_unwind(build_data::set_GIT_BRANCH);
    let _ = std::panic::catch_unwind(build_data::set_GIT_COMMIT_SHORT);
    let _ = std::panic::catch_unwind(build_data::set_GIT_DIRTY);
    let _ = std::panic::catch_unwind(build_data::set_SOURCE_TIMESTAMP);
    let _ = std::panic::catch_unwind(build_data::set_RUSTC_VERSION);
}
