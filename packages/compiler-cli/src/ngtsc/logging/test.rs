// Logging Tests
//
// Tests for the logging module.

#[cfg(test)]
mod tests {
    use crate::ngtsc::logging::*;

    mod log_level_tests {
        use super::*;

        #[test]
        fn should_have_correct_ordering() {
            assert!(LogLevel::Debug < LogLevel::Info);
            assert!(LogLevel::Info < LogLevel::Warn);
            assert!(LogLevel::Warn < LogLevel::Error);
        }

        #[test]
        fn should_label_levels() {
            assert_eq!(LogLevel::Debug.label(), "DEBUG");
            assert_eq!(LogLevel::Error.label(), "ERROR");
        }
    }

    mod console_logger_tests {
        use super::*;

        #[test]
        fn should_check_level_enabled() {
            let logger = ConsoleLogger::new(LogLevel::Warn);

            assert_eq!(logger.level(), LogLevel::Warn);
            assert!(!logger.is_enabled(LogLevel::Debug));
            assert!(!logger.is_enabled(LogLevel::Info));
            assert!(logger.is_enabled(LogLevel::Warn));
            assert!(logger.is_enabled(LogLevel::Error));
        }

        #[test]
        fn should_format_with_prefix() {
            let logger = ConsoleLogger::new(LogLevel::Debug).with_prefix("ngtcb");
            assert_eq!(logger.format(LogLevel::Info, "done"), "ngtcb: [INFO] done");
            assert_eq!(
                ConsoleLogger::new(LogLevel::Debug).format(LogLevel::Warn, "x"),
                "[WARN] x"
            );
        }
    }

    mod memory_logger_tests {
        use super::*;

        #[test]
        fn should_keep_only_enabled_messages() {
            let logger = MemoryLogger::new(LogLevel::Info);
            logger.debug("hidden");
            logger.info("shown");
            logger.error("also shown");

            assert_eq!(
                logger.messages(),
                vec![
                    (LogLevel::Info, "shown".to_string()),
                    (LogLevel::Error, "also shown".to_string()),
                ]
            );
        }
    }

    mod null_logger_tests {
        use super::*;

        #[test]
        fn should_not_log_anything() {
            let logger = NullLogger::new();

            assert!(!logger.is_enabled(LogLevel::Error));
            logger.debug("debug message");
            logger.error("error message");
        }
    }
}
