use crate::error::Result;
use crate::grouping::classifier::{LineClassifier, LineKind};
use crate::grouping::listing::ListingLine;
use std::collections::VecDeque;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InGroup,
}

/// Turns marker-annotated input lines into a grouped listing.
///
/// A header line closes any open group and opens a new one named after the
/// header's last token. Member lines inside a group emit their last token; a
/// line carrying both markers opens its group and is then its first member.
/// Members seen before the first header are dropped and only counted. An
/// open group is closed once the input is exhausted.
pub struct SoundListBuilder<I> {
    lines: I,
    classifier: LineClassifier,
    state: State,
    pending: VecDeque<ListingLine>,
    finished: bool,
    groups: usize,
    orphan_members: usize,
}

impl<I> SoundListBuilder<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I, classifier: LineClassifier) -> Self {
        Self {
            lines,
            classifier,
            state: State::Idle,
            pending: VecDeque::new(),
            finished: false,
            groups: 0,
            orphan_members: 0,
        }
    }

    /// Groups opened so far.
    pub fn groups(&self) -> usize {
        self.groups
    }

    /// Member lines dropped because no group was open.
    pub fn orphan_members(&self) -> usize {
        self.orphan_members
    }

    fn step(&mut self, kind: LineKind) {
        match (self.state, kind) {
            (state, LineKind::Header { name, member }) => {
                if state == State::InGroup {
                    self.pending.push_back(ListingLine::Close);
                }
                if member {
                    self.pending.push_back(ListingLine::Open(name.clone()));
                    self.pending.push_back(ListingLine::Member(name));
                } else {
                    self.pending.push_back(ListingLine::Open(name));
                }
                self.state = State::InGroup;
                self.groups += 1;
            }
            (State::InGroup, LineKind::Member(token)) => {
                self.pending.push_back(ListingLine::Member(token));
            }
            (State::Idle, LineKind::Member(_)) => {
                self.orphan_members += 1;
            }
            (_, LineKind::Other) => {}
        }
    }

    fn finish(&mut self) {
        if self.state == State::InGroup {
            self.pending.push_back(ListingLine::Close);
            self.state = State::Idle;
        }
        self.finished = true;
    }
}

impl<I> Iterator for SoundListBuilder<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<ListingLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }

            if self.finished {
                return None;
            }

            match self.lines.next() {
                Some(Ok(line)) => {
                    let kind = self.classifier.classify(&line);
                    self.step(kind);
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
                None => self.finish(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::listing::{parse_listing, Group};
    use std::io::{BufRead, Cursor};

    fn build(input: &str) -> Vec<String> {
        SoundListBuilder::new(Cursor::new(input).lines(), LineClassifier::default())
            .map(|line| line.map(|l| l.to_string()))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_single_group() {
        let input = " -- Menu\n     -- Start\n     -- Quit\n";
        assert_eq!(build(input), vec!["Menu={", "Start", "Quit", "}"]);
    }

    #[test]
    fn test_consecutive_headers_reopen() {
        let input = " -- Menu\n -- Game\n";
        assert_eq!(build(input), vec!["Menu={", "}", "Game={", "}"]);
    }

    #[test]
    fn test_line_with_both_markers_opens_and_joins_group() {
        assert_eq!(build(" -- a-- b\n"), vec!["b={", "b", "}"]);

        let input = " -- Menu\n     -- Start\n -- a-- b\n     -- c\n";
        assert_eq!(
            build(input),
            vec!["Menu={", "Start", "}", "b={", "b", "c", "}"]
        );
    }

    #[test]
    fn test_orphan_members_are_dropped() {
        let input = "     -- Lost\n -- Menu\n     -- Start\n";
        let mut builder =
            SoundListBuilder::new(Cursor::new(input).lines(), LineClassifier::default());
        let lines: Vec<String> = builder
            .by_ref()
            .map(|line| line.unwrap().to_string())
            .collect();

        assert_eq!(lines, vec!["Menu={", "Start", "}"]);
        assert_eq!(builder.orphan_members(), 1);
        assert_eq!(builder.groups(), 1);
    }

    #[test]
    fn test_no_headers_no_output() {
        assert!(build("").is_empty());
        assert!(build("int main() {}\n     -- Start\n").is_empty());
    }

    #[test]
    fn test_unmarked_lines_ignored() {
        let input = "// sounds\n -- Menu\nplay();\n     -- Start\n--  not a member\n";
        assert_eq!(build(input), vec!["Menu={", "Start", "}"]);
    }

    #[test]
    fn test_indentation_is_significant() {
        // Header marker at column 0 and member marker at column 4 do not match.
        let input = "-- Menu\n    -- Start\n";
        assert!(build(input).is_empty());
    }

    #[test]
    fn test_crlf_input() {
        let input = " -- Menu\r\n     -- Start\r\n";
        assert_eq!(build(input), vec!["Menu={", "Start", "}"]);
    }

    #[test]
    fn test_exhausted_builder_stays_done() {
        let mut builder =
            SoundListBuilder::new(Cursor::new(" -- A\n").lines(), LineClassifier::default());
        assert_eq!(builder.next().unwrap().unwrap(), ListingLine::Open("A".to_string()));
        assert_eq!(builder.next().unwrap().unwrap(), ListingLine::Close);
        assert!(builder.next().is_none());
        assert!(builder.next().is_none());
    }

    #[test]
    fn test_read_error_is_reported() {
        let lines = vec![
            Ok(" -- A".to_string()),
            Err(io::Error::from(io::ErrorKind::InvalidData)),
            Ok("     -- b".to_string()),
        ];
        let results: Vec<_> =
            SoundListBuilder::new(lines.into_iter(), LineClassifier::default()).collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_output_parses_back_into_groups() {
        let input = concat!(
            " -- Menu\n",
            "     -- Start\n",
            "     -- Quit\n",
            " -- Game\n",
            " -- Effects\n",
            "     -- boom.mp3\n",
            "     -- zap.mp3\n",
        );
        let rendered: String = build(input).iter().map(|l| format!("{}\n", l)).collect();
        let groups = parse_listing(&rendered).unwrap();

        assert_eq!(
            groups,
            vec![
                Group {
                    name: "Menu".to_string(),
                    members: vec!["Start".to_string(), "Quit".to_string()],
                },
                Group::new("Game"),
                Group {
                    name: "Effects".to_string(),
                    members: vec!["boom.mp3".to_string(), "zap.mp3".to_string()],
                },
            ]
        );
    }
}
