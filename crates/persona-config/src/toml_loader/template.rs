//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Persona Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
# bind = "127.0.0.1"
# port = 8501

[gemini]
# model = "gemini-2.0-flash-exp"
# api_key_env = "GEMINI_API_KEY"   # the key itself is never stored here
# connect_timeout_secs = 10
# request_timeout_secs = 120

[generation]
# temperature = 0.7        # 0.0-2.0
# top_p = 0.9              # 0.0-1.0
# top_k = 40               # >= 1
# max_output_tokens = 384  # >= 1

[character]
# preamble = "..."         # meta-instruction placed before every student prompt
# preamble_file = "/path/to/preamble.txt"   # overrides `preamble` when set
# max_prompt_words = 250

[sessions]
# idle_ttl_secs = 3600
# reap_interval_secs = 60

[logging]
# level = "info"           # trace, debug, info, warn, error
"##
}
