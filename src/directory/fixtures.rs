//! In-memory directory seeded with demo data.

use chrono::{NaiveDate, NaiveTime};

use super::{
    MenteeProfile, Mentor, MentorDirectory, MentorSession, MentorStats, Presence, RecentMessage,
    SkillProgress, UpcomingSession,
};
use crate::chat::{ChatMessage, Sender};

const AVATAR: &str = "/placeholder.svg?height=40&width=40";

pub struct FixtureDirectory {
    mentors: Vec<Mentor>,
    mentee: MenteeProfile,
    sessions: Vec<UpcomingSession>,
    progress: Vec<SkillProgress>,
    messages: Vec<RecentMessage>,
    mentor_sessions: Vec<MentorSession>,
    mentor_messages: Vec<RecentMessage>,
    mentor_stats: MentorStats,
    /// Mentor whose conversation carries the seed transcript.
    transcript_mentor: String,
    transcript: Vec<ChatMessage>,
}

impl FixtureDirectory {
    pub fn new(
        mentors: Vec<Mentor>,
        mentee: MenteeProfile,
        mut sessions: Vec<UpcomingSession>,
    ) -> Self {
        sessions.sort_by_key(|s| (s.date, s.time));
        Self {
            mentors,
            mentee,
            sessions,
            progress: Vec::new(),
            messages: Vec::new(),
            mentor_sessions: Vec::new(),
            mentor_messages: Vec::new(),
            mentor_stats: MentorStats::default(),
            transcript_mentor: String::new(),
            transcript: Vec::new(),
        }
    }

    pub fn seeded() -> Self {
        let mut directory = Self::new(seed_mentors(), seed_mentee(), seed_sessions());
        directory.progress = vec![
            progress("React", 75),
            progress("Node.js", 60),
            progress("TypeScript", 40),
            progress("GraphQL", 25),
        ];
        directory.messages = vec![
            recent(
                "Dr. Jane Smith",
                "Great progress on your last assignment!",
                "2h ago",
            ),
            recent(
                "Prof. Mike Johnson",
                "Don't forget to review the materials for our next session.",
                "5h ago",
            ),
            recent(
                "Sarah Williams",
                "I've shared some additional resources on TypeScript.",
                "1d ago",
            ),
        ];
        directory.mentor_sessions = seed_mentor_sessions();
        directory.mentor_messages = vec![
            recent("David Brown", "Thanks for the great session!", "2h ago"),
            recent("Eva Garcia", "Can we reschedule our next meeting?", "5h ago"),
            recent(
                "Frank Lee",
                "I've completed the assignment you gave me.",
                "1d ago",
            ),
        ];
        directory.mentor_stats = MentorStats {
            total_mentees: 12,
            upcoming_sessions: 5,
            hours_mentored: 48,
            average_rating: 4.8,
        };
        directory.transcript_mentor = "1".to_string();
        directory.transcript = seed_transcript();
        directory
    }
}

impl MentorDirectory for FixtureDirectory {
    fn mentors(&self) -> Vec<Mentor> {
        self.mentors.clone()
    }

    fn mentee(&self, username: &str) -> Option<MenteeProfile> {
        (self.mentee.username == username).then(|| self.mentee.clone())
    }

    fn upcoming_sessions(&self) -> Vec<UpcomingSession> {
        self.sessions.clone()
    }

    fn learning_progress(&self) -> Vec<SkillProgress> {
        self.progress.clone()
    }

    fn recent_messages(&self) -> Vec<RecentMessage> {
        self.messages.clone()
    }

    fn mentor_sessions(&self) -> Vec<MentorSession> {
        self.mentor_sessions.clone()
    }

    fn mentor_messages(&self) -> Vec<RecentMessage> {
        self.mentor_messages.clone()
    }

    fn mentor_stats(&self) -> MentorStats {
        self.mentor_stats.clone()
    }

    fn chat_history(&self, mentor_id: &str) -> Vec<ChatMessage> {
        if mentor_id == self.transcript_mentor {
            self.transcript.clone()
        } else {
            Vec::new()
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn progress(name: &str, progress: u8) -> SkillProgress {
    SkillProgress {
        name: name.to_string(),
        progress,
    }
}

fn recent(name: &str, message: &str, time: &str) -> RecentMessage {
    RecentMessage {
        name: name.to_string(),
        avatar: AVATAR.to_string(),
        message: message.to_string(),
        time: time.to_string(),
    }
}

fn seed_mentors() -> Vec<Mentor> {
    vec![
        Mentor {
            id: "1".to_string(),
            name: "Dr. Jane Smith".to_string(),
            avatar: AVATAR.to_string(),
            title: "Senior Software Engineer".to_string(),
            skills: strings(&["React", "Node.js", "GraphQL", "System Design"]),
            presence: Presence::Online,
            last_message: Some("Great! Let me know if you have any more questions.".to_string()),
        },
        Mentor {
            id: "2".to_string(),
            name: "Prof. Mike Johnson".to_string(),
            avatar: AVATAR.to_string(),
            title: "Data Scientist".to_string(),
            skills: strings(&["Python", "Machine Learning", "Data Structures"]),
            presence: Presence::Offline,
            last_message: Some("We'll discuss this in our next session.".to_string()),
        },
        Mentor {
            id: "3".to_string(),
            name: "Sarah Williams".to_string(),
            avatar: AVATAR.to_string(),
            title: "UX Designer".to_string(),
            skills: strings(&["UX Research", "Prototyping", "TypeScript"]),
            presence: Presence::Online,
            last_message: Some("Don't forget to submit your assignment by Friday.".to_string()),
        },
    ]
}

fn seed_mentee() -> MenteeProfile {
    MenteeProfile {
        id: "1".to_string(),
        username: "kushal".to_string(),
        name: "Kushalkumar Shaw".to_string(),
        avatar: "/ava.jpg?height=200&width=200".to_string(),
        title: "Aspiring Full Stack Developer".to_string(),
        bio: "Passionate about web development and eager to learn new technologies. \
              Currently focusing on React and Node.js."
            .to_string(),
        interests: strings(&["React", "Node.js", "TypeScript", "GraphQL"]),
        joined: "May 2023".to_string(),
        total_sessions: 12,
        learning_goals: strings(&[
            "Master React hooks and context API",
            "Build a full-stack application using the MERN stack",
            "Improve problem-solving skills through coding challenges",
        ]),
    }
}

fn seed_sessions() -> Vec<UpcomingSession> {
    let session = |id: &str, mentor: &str, date: NaiveDate, time: NaiveTime, topic: &str| {
        UpcomingSession {
            id: id.to_string(),
            mentor_name: mentor.to_string(),
            mentor_avatar: AVATAR.to_string(),
            topic: topic.to_string(),
            date,
            time,
        }
    };
    vec![
        session(
            "1",
            "Dr. Jane Smith",
            ymd(2023, 5, 15),
            hm(14, 0),
            "React Hooks Deep Dive",
        ),
        session(
            "2",
            "Prof. Mike Johnson",
            ymd(2023, 5, 18),
            hm(10, 0),
            "Introduction to Data Structures",
        ),
        session(
            "3",
            "Sarah Williams",
            ymd(2023, 5, 20),
            hm(15, 30),
            "UX Design Principles",
        ),
    ]
}

fn seed_mentor_sessions() -> Vec<MentorSession> {
    let session = |id: &str, mentee: &str, date: NaiveDate, time: NaiveTime, topic: &str| {
        MentorSession {
            id: id.to_string(),
            mentee_name: mentee.to_string(),
            mentee_avatar: AVATAR.to_string(),
            topic: topic.to_string(),
            date,
            time,
        }
    };
    vec![
        session("1", "Alice Johnson", ymd(2023, 5, 15), hm(14, 0), "React Hooks"),
        session(
            "2",
            "Bob Smith",
            ymd(2023, 5, 17),
            hm(10, 0),
            "State Management",
        ),
        session(
            "3",
            "Carol Williams",
            ymd(2023, 5, 20),
            hm(15, 30),
            "API Integration",
        ),
    ]
}

fn seed_transcript() -> Vec<ChatMessage> {
    let lines: [(Sender, &str, NaiveTime); 8] = [
        (Sender::Mentor, "Hello! How can I help you today?", hm(10, 0)),
        (
            Sender::Mentee,
            "Hi Dr. Smith! I have a question about React hooks.",
            hm(10, 2),
        ),
        (
            Sender::Mentor,
            "Sure, I'd be happy to help. What specific aspect of React hooks are you struggling with?",
            hm(10, 5),
        ),
        (
            Sender::Mentee,
            "I'm having trouble understanding the useEffect hook. Could you explain when to use it \
             and how it differs from componentDidMount?",
            hm(10, 7),
        ),
        (
            Sender::Mentor,
            "The useEffect hook is used for side effects in functional components. Unlike \
             componentDidMount, which only runs once after the initial render, useEffect can run \
             after every render or only when certain dependencies change.",
            hm(10, 10),
        ),
        (
            Sender::Mentor,
            "Here's a simple example:\n\nuseEffect(() => {\n  console.log('Component updated');\n  \
             return () => console.log('Component will unmount');\n}, []);",
            hm(10, 12),
        ),
        (
            Sender::Mentee,
            "Thank you, that helps a lot! So if I want to fetch data when the component mounts, \
             I would use useEffect with an empty dependency array?",
            hm(10, 15),
        ),
        (
            Sender::Mentor,
            "Exactly! You've got it. Is there anything else you'd like to know about useEffect \
             or other hooks?",
            hm(10, 17),
        ),
    ];

    lines
        .into_iter()
        .enumerate()
        .map(|(i, (sender, content, timestamp))| ChatMessage {
            id: i as u64 + 1,
            sender,
            content: content.to_string(),
            timestamp,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_mentors() {
        let directory = FixtureDirectory::seeded();
        let mentors = directory.mentors();
        assert_eq!(mentors.len(), 3);
        assert_eq!(mentors[0].name, "Dr. Jane Smith");
        assert_eq!(
            mentors[0].skills,
            vec!["React", "Node.js", "GraphQL", "System Design"]
        );
    }

    #[test]
    fn test_mentor_lookup() {
        let directory = FixtureDirectory::seeded();
        assert_eq!(directory.mentor("3").unwrap().title, "UX Designer");
        assert!(directory.mentor("42").is_none());
    }

    #[test]
    fn test_mentee_lookup_by_username() {
        let directory = FixtureDirectory::seeded();
        let mentee = directory.mentee("kushal").unwrap();
        assert_eq!(mentee.total_sessions, 12);
        assert_eq!(mentee.learning_goals.len(), 3);
        assert!(directory.mentee("someone-else").is_none());
    }

    #[test]
    fn test_sessions_are_chronological() {
        let sessions = FixtureDirectory::seeded().upcoming_sessions();
        for pair in sessions.windows(2) {
            assert!((pair[0].date, pair[0].time) <= (pair[1].date, pair[1].time));
        }
    }

    #[test]
    fn test_transcript_only_for_first_mentor() {
        let directory = FixtureDirectory::seeded();
        let history = directory.chat_history("1");
        assert_eq!(history.len(), 8);
        assert_eq!(history.last().unwrap().id, 8);
        assert!(directory.chat_history("2").is_empty());
    }

    #[test]
    fn test_progress_is_bounded() {
        let directory = FixtureDirectory::seeded();
        assert!(directory
            .learning_progress()
            .iter()
            .all(|p| p.progress <= 100));
    }

    #[test]
    fn test_mentor_side_is_seeded() {
        let directory = FixtureDirectory::seeded();
        let sessions = directory.mentor_sessions();
        let mentees: Vec<&str> = sessions.iter().map(|s| s.mentee_name.as_str()).collect();
        assert_eq!(mentees, vec!["Alice Johnson", "Bob Smith", "Carol Williams"]);
        assert_eq!(sessions[2].time, hm(15, 30));

        let senders: Vec<String> = directory
            .mentor_messages()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(senders, vec!["David Brown", "Eva Garcia", "Frank Lee"]);

        let stats = directory.mentor_stats();
        assert_eq!(stats.total_mentees, 12);
        assert_eq!(stats.hours_mentored, 48);
    }

    #[test]
    fn test_empty_directory_has_no_mentor_side() {
        let directory = FixtureDirectory::new(Vec::new(), seed_mentee(), Vec::new());
        assert!(directory.mentor_sessions().is_empty());
        assert_eq!(directory.mentor_stats(), MentorStats::default());
    }
}
