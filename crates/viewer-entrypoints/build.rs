fn main() {
    // Generates the `build` module consumed by `shadow!(build)` in metadata.rs
    shadow_rs::ShadowBuilder::builder().build().unwrap();
}
