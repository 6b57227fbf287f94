use std::fs;
use std::path::Path;

// Mirrors the compiled frontend bundle into static/ so include_dir! can
// embed it. An empty placeholder keeps the macro happy when the frontend
// has not been built yet.
fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    let _ = fs::remove_dir_all(out_dir);
    if dist_dir.exists() {
        fs::create_dir_all(out_dir).expect("create static dir");
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).copy_inside(true),
        )
        .expect("copy frontend dist");
    } else {
        fs::create_dir_all(out_dir.join("dist")).expect("create static placeholder");
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
