//! Folds sorted headers into continuous-recording groups.

use chrono::NaiveDateTime;
use cuescan_wav::{WavHeader, WavResult};
use tracing::debug;

use crate::error::{SessionError, SessionResult};
use crate::matcher::ContinuationMatcher;

/// A maximal run of files that together form one continuous recording.
#[derive(Debug, Clone)]
pub struct RecordingGroup {
    members: Vec<WavHeader>,
}

/// One cue point positioned on a group's timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupCue {
    /// 1-based position across the whole group.
    pub number: usize,
    /// Cue id from the owning file's `cue ` chunk.
    pub cue_id: u32,
    /// Seconds elapsed since the group started recording.
    pub seconds_from_start: f64,
}

impl RecordingGroup {
    fn new(first: WavHeader) -> Self {
        Self {
            members: vec![first],
        }
    }

    /// Files of this group in recording order. Never empty.
    pub fn members(&self) -> &[WavHeader] {
        &self.members
    }

    /// Longest common prefix of the member file names, with a trailing
    /// `*` when the group spans more than one file.
    pub fn title(&self) -> String {
        let names: Vec<&str> = self.members.iter().filter_map(WavHeader::file_name).collect();
        let mut title = common_prefix(&names).to_string();
        if self.members.len() > 1 {
            title.push('*');
        }
        title
    }

    /// Wall-clock start of the first file, when known.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.members.first().and_then(|m| m.start_datetime)
    }

    /// Wall-clock end of the last file, when known.
    pub fn end_time(&self) -> WavResult<Option<NaiveDateTime>> {
        match self.members.last() {
            Some(member) => member.end_time(),
            None => Ok(None),
        }
    }

    /// Every cue point of every member, numbered from 1 across the whole
    /// group, with elapsed seconds measured from the group's start: the
    /// summed payload duration of all earlier members plus the cue's own
    /// offset within its file.
    pub fn cue_timeline(&self) -> WavResult<Vec<GroupCue>> {
        let mut cues = Vec::new();
        let mut elapsed = 0.0;
        let mut number = 1;
        for member in &self.members {
            for timed in member.cue_points_with_seconds()? {
                cues.push(GroupCue {
                    number,
                    cue_id: timed.id,
                    seconds_from_start: elapsed + timed.seconds,
                });
                number += 1;
            }
            elapsed += member.length_seconds()?;
        }
        Ok(cues)
    }
}

/// Folds `headers`, sorted by file name, into ordered groups.
///
/// The first header always opens a group; every later header joins the
/// open group exactly when the matcher calls it a continuation of the
/// group's last member. A naming-convention error only breaks that one
/// boundary: it is logged and the current file starts a fresh group.
/// Other errors propagate.
pub fn group_headers(
    matcher: &ContinuationMatcher,
    headers: Vec<WavHeader>,
) -> SessionResult<Vec<RecordingGroup>> {
    let mut groups: Vec<RecordingGroup> = Vec::new();

    for header in headers {
        let previous = groups.last().and_then(|group| group.members.last());
        let continues = match matcher.is_continuation_of(previous, &header) {
            Ok(continues) => continues,
            Err(SessionError::NamingConvention { name }) => {
                debug!(%name, "file outside the naming convention starts a new group");
                false
            }
            Err(other) => return Err(other),
        };

        if continues {
            groups
                .last_mut()
                .expect("a continuation always has an open group")
                .members
                .push(header);
        } else {
            groups.push(RecordingGroup::new(header));
        }
    }

    debug!(groups = groups.len(), "grouping done");
    Ok(groups)
}

// Byte-wise longest common prefix, trimmed back to a char boundary.
fn common_prefix<'a>(names: &[&'a str]) -> &'a str {
    let Some(&first) = names.first() else {
        return "";
    };
    let mut len = first.len();
    for name in &names[1..] {
        let matching = first
            .bytes()
            .zip(name.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        len = len.min(matching);
    }
    while !first.is_char_boundary(len) {
        len -= 1;
    }
    &first[..len]
}
