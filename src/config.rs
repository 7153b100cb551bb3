use crate::error::Result;
use crate::rate::CompressionRate;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionOptions {
    /// Rate a freshly selected image starts with
    pub default_rate: CompressionRate,
    /// Give up on the codec after this long; `None` waits indefinitely
    pub codec_timeout: Option<Duration>,
}

impl SessionOptions {
    pub fn new(default_rate: Option<u8>, codec_timeout_secs: Option<u64>) -> Result<Self> {
        let default_rate = match default_rate {
            Some(rate) => CompressionRate::new(rate)?,
            None => CompressionRate::default(),
        };

        Ok(Self {
            default_rate,
            codec_timeout: codec_timeout_secs
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompressionError;

    #[test]
    fn test_session_options_default() {
        let options = SessionOptions::new(None, None).unwrap();
        assert_eq!(options.default_rate.value(), 70);
        assert_eq!(options.codec_timeout, None);
        assert_eq!(options, SessionOptions::default());
    }

    #[test]
    fn test_session_options_creation() {
        let options = SessionOptions::new(Some(40), Some(30)).unwrap();
        assert_eq!(options.default_rate.value(), 40);
        assert_eq!(options.codec_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_session_options_zero_timeout_disables_it() {
        let options = SessionOptions::new(None, Some(0)).unwrap();
        assert_eq!(options.codec_timeout, None);
    }

    #[test]
    fn test_session_options_invalid_rate() {
        let result = SessionOptions::new(Some(5), None);
        assert!(matches!(
            result,
            Err(CompressionError::InvalidCompressionRate(5, 10, 100))
        ));
    }
}
