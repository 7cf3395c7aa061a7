/// Print an informational message
#[macro_export]
macro_rules! info {
    (no_log, $($arg:tt)*) => {{
        let msg = format!("{}", format_args!($($arg)*));
        if $crate::print::is_print() {
            println!("{} {}", $crate::owo_colors::OwoColorize::yellow(&"[info]"), msg);
        }
    }};

    ($($arg:tt)*) => {{
        let msg = format!("{}", format_args!($($arg)*));
        if $crate::print::is_print() {
            println!("{} {}", $crate::owo_colors::OwoColorize::yellow(&"[info]"), msg);
        }
        $crate::print::print_to_file(&msg, $crate::print::LogType::Info);
    }};
}

/// Print an error message
#[macro_export]
macro_rules! err {
    (no_log, $($arg:tt)*) => {{
        let msg = format!("{}", format_args!($($arg)*));
        if $crate::print::is_print() {
            eprintln!("{} {}", $crate::owo_colors::OwoColorize::red(&"[error]"), msg);
        }
    }};

    ($($arg:tt)*) => {{
        let msg = format!("{}", format_args!($($arg)*));
        if $crate::print::is_print() {
            eprintln!("{} {}", $crate::owo_colors::OwoColorize::red(&"[error]"), msg);
        }
        $crate::print::print_to_file(&msg, $crate::print::LogType::Error);
    }};
}

/// Print a point message, i.e. a small step in some process
#[macro_export]
macro_rules! pt {
    (no_log, $($arg:tt)*) => {{
        let msg = format!("{}", format_args!($($arg)*));
        if $crate::print::is_print() {
            println!("{} {}", $crate::owo_colors::OwoColorize::bold(&"-"), msg);
        }
    }};

    ($($arg:tt)*) => {{
        let msg = format!("{}", format_args!($($arg)*));
        if $crate::print::is_print() {
            println!("{} {}", $crate::owo_colors::OwoColorize::bold(&"-"), msg);
        }
        $crate::print::print_to_file(&msg, $crate::print::LogType::Point);
    }};
}
