//! Fish shell completion script

/// Script calling back into `dcr --complete-next` for every completion
pub const FISH_SCRIPT: &str = r#"# Put this in ~/.config/fish/completions
# or /usr/share/fish/vendor_completions.d
function __fish_get_dcr_command
  set cmd (commandline -opc)
  eval $cmd --complete-next
end
complete -f -c dcr -a "(__fish_get_dcr_command)""#;

/// Execute the fish command
pub fn execute_fish() {
    println!("{}", FISH_SCRIPT);
}
