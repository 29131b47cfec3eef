// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
  __       _                                _
 / _|_   _| | ___   ___      ____ _ _ __ __ _(_)
| |_| | | | |/ / | | \ \ /\ / / _` | '__/ _` | |
|  _| |_| |   <| |_| |\ V  V / (_| | | | (_| | |
|_|  \__,_|_|\_\\__,_| \_/\_/ \__,_|_|  \__,_|_|

    Code Puzzle Playground
"#;
    println!("{}", banner);
}
