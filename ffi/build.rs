use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap_or_else(|_| ".".into()));

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("ENDPOINT_FFI_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(out_dir.join("endpoint_ffi.h"));
        }
        Err(err) => println!("cargo:warning=endpoint_ffi.h not generated: {err}"),
    }
}
