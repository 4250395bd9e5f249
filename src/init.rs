use crate::config::Shell;

fn get_exe_path() -> Option<String> {
    let path = std::env::current_exe().ok()?;
    let canonical = std::fs::canonicalize(path).ok()?;
    canonical.into_os_string().into_string().ok()
}

fn init_script_zsh(exe_path: &str) -> String {
    format!(
        "\
            __dashline_precmd() {{\n\
            \x20   local code=$?\n\
            \x20   local -a flags\n\
            \x20   (( ${{#${{(M)jobstates:#running:*}}}} )) && flags+=(--runningjobs)\n\
            \x20   (( ${{#${{(M)jobstates:#suspended:*}}}} )) && flags+=(--suspendedjobs)\n\
            \x20   '{}' --exitcode=\"$code\" --width=\"$COLUMNS\" --color $flags\n\
            }}\n\
            precmd_functions+=(__dashline_precmd)\n\
            PS1='%# '\n\
        ",
        exe_path
    )
}

fn init_script_fish(exe_path: &str) -> String {
    format!(
        "\
            function fish_prompt\n\
            \x20   set -l code $status\n\
            \x20   set -l flags\n\
            \x20   jobs -q; and set flags --runningjobs\n\
            \x20   '{}' --exitcode=\"$code\" --width=\"$COLUMNS\" --color $flags\n\
            \x20   echo -n '> '\n\
            end\n\
        ",
        exe_path
    )
}

fn init_script_bash(exe_path: &str) -> String {
    format!(
        "\
            __dashline_prompt() {{\n\
            \x20   local code=$?\n\
            \x20   local flags=()\n\
            \x20   [ -n \"$(jobs -rp)\" ] && flags+=(--runningjobs)\n\
            \x20   [ -n \"$(jobs -sp)\" ] && flags+=(--suspendedjobs)\n\
            \x20   '{}' --exitcode=\"$code\" --width=\"$COLUMNS\" --color \"${{flags[@]}}\"\n\
            }}\n\
            PROMPT_COMMAND=__dashline_prompt\n\
            PS1='\\$ '\n\
        ",
        exe_path
    )
}

pub fn init_script(shell: Shell) -> String {
    match get_exe_path() {
        None => String::from("echo 'Error getting executable path for prompt'; (exit 1)"),
        Some(path) => match shell {
            Shell::Zsh => init_script_zsh(&path),
            Shell::Fish => init_script_fish(&path),
            Shell::Bash => init_script_bash(&path),
        },
    }
}

pub fn echo_init_script(shell: Shell) {
    print!("{}", init_script(shell));
}
