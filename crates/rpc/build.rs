fn main() {
    let proto_file = "proto/person.proto";
    println!("cargo:rerun-if-changed={proto_file}");
    println!("cargo:rerun-if-env-changed=PROTOC");

    // Fall back to the bundled compiler when none is installed.
    if std::env::var_os("PROTOC").is_none() {
        let protoc = protoc_bin_vendored::protoc_bin_path()
            .expect("bundled protoc must be available for this platform");
        std::env::set_var("PROTOC", protoc);
    }

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&[proto_file], &["proto"])
        .expect("person proto compilation must succeed");
}
