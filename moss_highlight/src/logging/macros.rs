//! Logging macros taking a message plus `"key" => value` context pairs.
//! Values only need `Display`.

/// Log error with a [`Code`](crate::logging::Code)
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, context_refs)
        }
    };
}

/// Log success with a [`Code`](crate::logging::Code)
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

/// `log_warning!(code = CODE, msg, ...)` attaches a code to the warning
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr) => {
        $crate::logging::log_coded_warning_with_context($code, $message, vec![])
    };

    (code = $code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_coded_warning_with_context($code, $message, context_refs)
        }
    };

    ($message:expr) => {
        $crate::logging::log_warning_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_warning_with_context($message, context_refs)
        }
    };
}

/// Context values are not formatted when debug output is filtered out
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_debug_with_context($message, vec![])
        }
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        if $crate::logging::debug_enabled() {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_debug_with_context($message, context_refs)
        }
    };
}
