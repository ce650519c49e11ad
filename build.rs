const COMMANDS: &[&str] = &["create_album", "save_album", "save_album_detailed", "invoke_method"];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
