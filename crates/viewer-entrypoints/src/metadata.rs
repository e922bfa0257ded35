use shadow_rs::shadow;

shadow!(build);

/// Log version and build info once at startup.
#[allow(dead_code)] // Allow auto-generated code containing unused build metadata
pub fn log_version_info(app_name: &str) {
    tracing::info!("{}", short_version_info(app_name));
    tracing::info!(
        "Build date: {} ({})",
        build::BUILD_TIME_2822,
        build::BUILD_RUST_CHANNEL
    );
}

/// One line describing the running build, e.g. `Robodog Trail 0.1.0 (main@abc1234+dirty)`.
#[allow(dead_code)] // Allow auto-generated code containing unused build metadata
pub fn short_version_info(app_name: &str) -> String {
    format!(
        "{} {} ({}@{}{})",
        app_name,
        build::PKG_VERSION,
        build::BRANCH,
        build::SHORT_COMMIT,
        if build::GIT_CLEAN { "" } else { "+dirty" }
    )
}
