pub mod layout;
pub mod path;
pub mod text_input;

pub use layout::{create_split_layout, create_standard_layout};
pub use path::{
    expand_path, format_path_for_display, format_size, get_config_dir, get_config_path,
    get_home_dir, get_log_dir,
};
pub use text_input::TextInput;
