fn main() {
    // Compile the Slint file.
    //
    // The digitaltwin.slint file is compiled into a Rust file that contains the UI code.
    slint_build::compile("../ui/digitaltwin.slint").expect("Slint build failed");
}
