use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Shared proto directory (../../proto relative to client/rust) so the
    // server and every client compile the same schema.
    let proto_root = "../../proto";

    println!("cargo:rerun-if-changed={}", proto_root);

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        // Descriptor set backs the reflection service in dev/test modes.
        .file_descriptor_set_path(out_dir.join("user_descriptor.bin"))
        .compile_protos(&[format!("{}/user/user.proto", proto_root)], &[proto_root])?;

    Ok(())
}
