use shadow_rs::ShadowBuilder;

fn main() {
    // Migrations are embedded at compile time.
    println!("cargo:rerun-if-changed=migrations");

    // Version metadata for `--version` and the default application version.
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
