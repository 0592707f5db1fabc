//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# gemchat configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[provider]
# model = "gemini-2.0-flash"
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"
# max_output_tokens = 4096
# temperature = 0.7          # 0.0-2.0
# connect_timeout_secs = 10  # 1-300
# request_timeout_secs = 120 # 1-3600

[session]
# mode = "none"              # none, native, simulated
# system_instruction = "You are a cat. You will answer questions as a cat."
# context = "full"           # full, latest
# code_execution = false

[credentials]
# provider_name = "gemini"
# key_file = "keys.txt"      # first line: name:secret
# env_var = "GEMINI_API_KEY" # checked before key_file

[display]
# user_prompt = "[User]: "
# model_prefix = "[GenAI]:"
# show_parts = false
# print_history = false

[logging]
# level = "WARN"             # DEBUG, INFO, WARN, ERROR
"##
    .to_string()
}
