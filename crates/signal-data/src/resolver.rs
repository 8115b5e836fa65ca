//! Occurrence Resolution

use crate::error::ResolveError;
use crate::recording::Occurrence;
use channel_config::ChannelConfig;
use tracing::debug;

/// Picks the occurrence of a channel to analyze.
///
/// - no occurrence: not found
/// - one occurrence: used as is, the discriminator is not checked
/// - several: the first (in encounter order) whose source identity contains
///   the discriminator; an empty discriminator matches the first one
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelResolver;

impl ChannelResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve with the discriminator of `config`
    pub fn resolve<'a>(
        &self,
        channel: &str,
        occurrences: &'a [Occurrence],
        config: &ChannelConfig,
    ) -> Result<&'a Occurrence, ResolveError> {
        self.resolve_by(channel, occurrences, &config.back2back_id)
    }

    /// Resolve with an explicit discriminator
    pub fn resolve_by<'a>(
        &self,
        channel: &str,
        occurrences: &'a [Occurrence],
        discriminator: &str,
    ) -> Result<&'a Occurrence, ResolveError> {
        match occurrences {
            [] => Err(ResolveError::NotFound {
                channel: channel.to_string(),
            }),
            [only] => Ok(only),
            candidates => {
                let found = candidates
                    .iter()
                    .find(|occ| occ.source.contains(discriminator))
                    .ok_or_else(|| ResolveError::Ambiguous {
                        channel: channel.to_string(),
                        discriminator: discriminator.to_string(),
                        candidates: candidates.len(),
                    })?;
                debug!(
                    "Channel {} resolved to {}:{} ({}) among {} occurrences",
                    channel,
                    found.group,
                    found.index,
                    found.source,
                    candidates.len()
                );
                Ok(found)
            }
        }
    }
}
