//! Page bodies
//!
//! Each function returns the markup placed inside [`super::layout`].

use horizons_common::db::{JournalEntry, Progress};
use horizons_common::stats::{ChartSeries, DashboardStats};
use horizons_common::time::long_date;

use super::content::{COMMUNITY_POSTS, HELPLINES, SELF_HELP, THERAPY_PLATFORMS, TOP_CONTRIBUTORS};
use super::escape;
use super::markdown::render_markdown;
use crate::ai::{PlanDuration, PlanOutcome, ReplySource};

/// Landing page counters
#[derive(Debug, Clone)]
pub struct HomeStats {
    pub healed_hearts: i64,
    pub journal_entries: i64,
    pub satisfaction_rate: u32,
    pub local_resources: u32,
    pub active_today: u32,
}

#[derive(Debug, Clone)]
pub struct CommunityStats {
    pub total_members: u32,
    pub posts_today: u32,
    pub active_now: u32,
    pub success_stories: u32,
}

fn plan_options() -> String {
    PlanDuration::ALL
        .iter()
        .map(|d| format!(r#"<option value="{}">{}</option>"#, d.as_str(), d.label()))
        .collect()
}

pub fn home_body(stats: &HomeStats) -> String {
    format!(
        r#"
<section class="hero">
    <h1>Heal. Grow. Rise.</h1>
    <p>Personalised breakup recovery guidance, rooted in Indian culture and backed by four AI companions.</p>
</section>

<section class="stat-grid">
    <div class="stat"><span class="stat-value">{healed}+</span><span class="stat-label">Hearts Healed</span></div>
    <div class="stat"><span class="stat-value">{entries}+</span><span class="stat-label">Journal Entries</span></div>
    <div class="stat"><span class="stat-value">{satisfaction}%</span><span class="stat-label">Feel Better</span></div>
    <div class="stat"><span class="stat-value">{resources}+</span><span class="stat-label">Local Resources</span></div>
    <div class="stat"><span class="stat-value">{active}</span><span class="stat-label">Healing Today</span></div>
</section>

<section class="card">
    <h2>Create Your Recovery Plan</h2>
    <form method="post" action="/generate_plan" class="plan-form">
        <label for="user_input">What happened? Share as much or as little as you like.</label>
        <textarea id="user_input" name="user_input" rows="6" required
            placeholder="We were together for three years and it ended last week..."></textarea>
        <label for="plan_type">Plan length</label>
        <select id="plan_type" name="plan_type">{options}</select>
        <button type="submit" class="button">Get My Healing Plan</button>
    </form>
</section>

<section class="card mood-check">
    <h2>Quick Mood Check</h2>
    <p>Tell us how you feel right now and get three small next steps.</p>
    <textarea id="moodText" rows="3" placeholder="Today I feel..."></textarea>
    <button type="button" class="button" id="moodCheckButton">Check In</button>
    <div id="moodResult" class="mood-result" hidden></div>
</section>
"#,
        healed = stats.healed_hearts,
        entries = stats.journal_entries,
        satisfaction = stats.satisfaction_rate,
        resources = stats.local_resources,
        active = stats.active_today,
        options = plan_options(),
    )
}

fn entry_card(entry: &JournalEntry, delete_enabled: bool) -> String {
    let tags: String = entry
        .tag_list()
        .into_iter()
        .map(|t| format!(r#"<span class="tag">{}</span>"#, escape(t)))
        .collect();
    let mood = entry.mood.as_deref().unwrap_or("neutral");
    let delete = if delete_enabled {
        format!(
            r#"<form method="post" action="/delete_entry/{}" class="delete-form">
                <button type="submit" class="link-button">Delete</button>
            </form>"#,
            entry.id
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="entry">
    <header>
        <span class="mood mood-{mood_class}">{mood}</span>
        <time>{date}</time>
        {delete}
    </header>
    <p>{content}</p>
    <div class="tags">{tags}</div>
</article>"#,
        mood_class = escape(mood),
        mood = escape(mood),
        date = entry.created_at.format("%b %d, %Y %H:%M"),
        delete = delete,
        content = escape(&entry.content).replace('\n', "<br>"),
        tags = tags,
    )
}

fn chart(series: &ChartSeries) -> String {
    if series.labels.is_empty() {
        return r#"<p class="muted">Save a journal entry to start your mood chart.</p>"#.to_string();
    }
    let columns: String = series
        .labels
        .iter()
        .zip(series.moods.iter().zip(series.activity.iter()))
        .map(|(label, (mood, activity))| {
            format!(
                r#"<div class="chart-col" title="Mood {mood}/10, Activity {activity}/10">
    <div class="bars">
        <div class="bar bar-mood" style="height: {mood_pct}%"></div>
        <div class="bar bar-activity" style="height: {activity_pct}%"></div>
    </div>
    <span class="chart-label">{label}</span>
</div>"#,
                mood = mood,
                activity = activity,
                mood_pct = (*mood).clamp(0, 10) * 10,
                activity_pct = (*activity).clamp(0, 10) * 10,
                label = escape(label),
            )
        })
        .collect();
    format!(
        r#"<div class="chart">{}</div>
<p class="chart-legend"><span class="swatch bar-mood"></span> Mood <span class="swatch bar-activity"></span> Activity</p>"#,
        columns
    )
}

pub struct DashboardView<'a> {
    pub username: &'a str,
    pub recovery_stage: &'a str,
    pub entries: &'a [JournalEntry],
    pub progress: &'a [Progress],
    pub stats: &'a DashboardStats,
    pub affirmation: &'a str,
    /// `None` when progress tracking is disabled
    pub chart: Option<&'a ChartSeries>,
    pub journal_enabled: bool,
}

pub fn dashboard_body(view: &DashboardView<'_>) -> String {
    let entries = if view.entries.is_empty() {
        r#"<p class="muted">No journal entries yet.</p>"#.to_string()
    } else {
        view.entries
            .iter()
            .map(|e| entry_card(e, view.journal_enabled))
            .collect()
    };

    let progress_section = match view.chart {
        Some(series) => {
            let rows: String = view
                .progress
                .iter()
                .map(|p| {
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                        p.date.format("%b %d"),
                        score(p.mood_score),
                        score(p.activity_score),
                        score(p.social_score)
                    )
                })
                .collect();
            format!(
                r#"<section class="card">
    <h2>Your Week</h2>
    {chart}
    <table class="progress-table">
        <thead><tr><th>Date</th><th>Mood</th><th>Activity</th><th>Social</th></tr></thead>
        <tbody>{rows}</tbody>
    </table>
</section>"#,
                chart = chart(series),
                rows = rows
            )
        }
        None => String::new(),
    };

    let journal_link = if view.journal_enabled {
        r#"<a href="/journal" class="button">Write in Journal</a>"#
    } else {
        ""
    };

    format!(
        r#"
<section class="hero small">
    <h1>Welcome back, {username}</h1>
    <p>Recovery stage: <strong>{stage}</strong></p>
    <blockquote class="affirmation">{affirmation}</blockquote>
</section>

<section class="stat-grid">
    <div class="stat"><span class="stat-value">{total}</span><span class="stat-label">Entries</span></div>
    <div class="stat"><span class="stat-value">{streak}</span><span class="stat-label">Day Streak</span></div>
    <div class="stat"><span class="stat-value">{mood}</span><span class="stat-label">Most Common Mood</span></div>
    <div class="stat"><span class="stat-value">{days}</span><span class="stat-label">Days Active</span></div>
</section>

{progress}

<section class="card">
    <h2>Recent Entries</h2>
    {entries}
    {journal_link}
</section>
"#,
        username = escape(view.username),
        stage = escape(view.recovery_stage),
        affirmation = escape(view.affirmation),
        total = view.stats.total_entries,
        streak = view.stats.current_streak,
        mood = escape(&view.stats.most_common_mood),
        days = view.stats.days_active,
        progress = progress_section,
        entries = entries,
        journal_link = journal_link,
    )
}

fn score(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn journal_body(entries: &[JournalEntry]) -> String {
    let list = if entries.is_empty() {
        r#"<p class="muted">Your journal is empty. Writing even one sentence helps.</p>"#.to_string()
    } else {
        entries.iter().map(|e| entry_card(e, true)).collect()
    };

    format!(
        r#"
<section class="card">
    <h1>My Journal</h1>
    <form method="post" action="/journal" class="journal-form">
        <label for="content">How are you feeling today?</label>
        <textarea id="content" name="content" rows="6" required></textarea>
        <fieldset class="mood-selector">
            <legend>Mood</legend>
            <label><input type="radio" name="mood" value="happy"> 😊 Happy</label>
            <label><input type="radio" name="mood" value="neutral" checked> 😐 Neutral</label>
            <label><input type="radio" name="mood" value="sad"> 😢 Sad</label>
        </fieldset>
        <label for="tags">Tags (comma separated)</label>
        <input id="tags" name="tags" type="text" placeholder="self-care, family">
        <button type="submit" class="button">Save Entry</button>
    </form>
</section>

<section class="entries">
    <h2>Past Entries ({count})</h2>
    {list}
</section>
"#,
        count = entries.len(),
        list = list,
    )
}

pub fn results_body(outcome: &PlanOutcome) -> String {
    let sections: String = outcome
        .replies
        .iter()
        .map(|reply| {
            let badge = match reply.source {
                ReplySource::Ai => r#"<span class="badge badge-ai">AI generated</span>"#,
                ReplySource::Fallback => r#"<span class="badge badge-curated">Expert guidance</span>"#,
            };
            format!(
                r#"<section class="card persona persona-{key}" id="{key}">
    <h2>{icon} {heading} {badge}</h2>
    <p class="persona-name">{name}</p>
    <div class="markdown-content">{content}</div>
</section>"#,
                key = reply.persona.key(),
                icon = reply.persona.icon(),
                heading = reply.persona.heading(),
                badge = badge,
                name = reply.persona.name(),
                content = render_markdown(&reply.content),
            )
        })
        .collect();

    format!(
        r#"
<section class="hero small">
    <h1>Your Healing Plan</h1>
    <p>{plan} · Four perspectives on where you are and where you are going.</p>
</section>
{sections}
<p class="actions"><a href="/" class="button">Start Over</a> <a href="/dashboard" class="button secondary">Go to Dashboard</a></p>
"#,
        plan = outcome.plan.label(),
        sections = sections,
    )
}

pub fn resources_body() -> String {
    let helplines: String = HELPLINES
        .iter()
        .map(|h| {
            format!(
                r#"<article class="resource">
    <h3>{name}</h3>
    <p class="resource-type">{kind} · {available}</p>
    <p>{description}</p>
    <p><a href="tel:{contact}" class="button">Call {contact}</a> <a href="{website}" target="_blank" rel="noopener">Website</a></p>
</article>"#,
                name = h.name,
                kind = h.kind,
                available = h.available,
                description = h.description,
                contact = h.contact,
                website = h.website,
            )
        })
        .collect();

    let therapy: String = THERAPY_PLATFORMS
        .iter()
        .map(|t| {
            format!(
                r#"<article class="resource">
    <h3>{name}</h3>
    <p class="resource-type">{kind}</p>
    <p>{description}</p>
    <p><strong>{pricing}</strong> · <a href="{website}" target="_blank" rel="noopener">Visit</a></p>
</article>"#,
                name = t.name,
                kind = t.kind,
                description = t.description,
                pricing = escape(t.pricing),
                website = t.website,
            )
        })
        .collect();

    let self_help: String = SELF_HELP
        .iter()
        .map(|s| {
            format!(
                r#"<article class="resource">
    <h3>{icon} {name}</h3>
    <p class="resource-type">{kind}</p>
    <p>{description}</p>
</article>"#,
                icon = s.icon,
                name = s.name,
                kind = escape(s.kind),
                description = s.description,
            )
        })
        .collect();

    format!(
        r#"
<section class="hero small">
    <h1>Support Resources</h1>
    <p>You do not have to do this alone. Reach out to trained professionals any time.</p>
</section>
<section><h2>Helplines</h2><div class="resource-grid">{helplines}</div></section>
<section><h2>Online Therapy</h2><div class="resource-grid">{therapy}</div></section>
<section><h2>Self-Help Tools</h2><div class="resource-grid">{self_help}</div></section>
"#,
        helplines = helplines,
        therapy = therapy,
        self_help = self_help,
    )
}

pub fn community_body(stats: &CommunityStats) -> String {
    let posts: String = COMMUNITY_POSTS
        .iter()
        .map(|p| {
            format!(
                r#"<article class="post post-{category}">
    <header><strong>{author}</strong> <span class="muted">{time_ago}</span> <span class="tag">{category}</span></header>
    <p>{content}</p>
    <footer>❤️ {hearts} · 🤗 {hugs} · 💬 {comments}</footer>
</article>"#,
                category = p.category,
                author = p.author,
                time_ago = p.time_ago,
                content = escape(p.content),
                hearts = p.hearts,
                hugs = p.hugs,
                comments = p.comments,
            )
        })
        .collect();

    let contributors: String = TOP_CONTRIBUTORS
        .iter()
        .map(|(name, posts, hearts)| {
            format!("<li><strong>{}</strong> {} posts · {} hearts</li>", name, posts, hearts)
        })
        .collect();

    format!(
        r#"
<section class="hero small">
    <h1>Support Community</h1>
    <p>Stories, advice and encouragement from people who have been there.</p>
</section>
<section class="stat-grid">
    <div class="stat"><span class="stat-value">{members}</span><span class="stat-label">Members</span></div>
    <div class="stat"><span class="stat-value">{posts_today}</span><span class="stat-label">Posts Today</span></div>
    <div class="stat"><span class="stat-value">{active}</span><span class="stat-label">Online Now</span></div>
    <div class="stat"><span class="stat-value">{stories}</span><span class="stat-label">Success Stories</span></div>
</section>
<div class="community">
    <section class="posts">{posts}</section>
    <aside class="card"><h2>Top Contributors</h2><ol>{contributors}</ol></aside>
</div>
"#,
        members = stats.total_members,
        posts_today = stats.posts_today,
        active = stats.active_now,
        stories = stats.success_stories,
        posts = posts,
        contributors = contributors,
    )
}

pub fn about_body() -> String {
    r#"
<section class="card">
    <h1>About Healing Horizons</h1>
    <p>Healing Horizons helps people in India move through heartbreak with structure and kindness.
    We combine journaling, mood tracking and four AI companions: an empathetic therapist, a
    recovery planner, a closure specialist and a brutally honest coach.</p>
    <h2>Our Approach</h2>
    <ul>
        <li>Evidence-based practices from positive psychology and mindfulness</li>
        <li>Guidance that respects Indian family and cultural context</li>
        <li>Expert-written recovery guidance whenever the AI is unavailable</li>
    </ul>
    <p>Healing Horizons is not a substitute for professional care. If you are in crisis, please
    visit our <a href="/resources">resources page</a>.</p>
</section>
"#
    .to_string()
}

pub fn privacy_body(today: chrono::NaiveDate) -> String {
    format!(
        r#"
<section class="card legal">
    <h1>Privacy Policy</h1>
    <p class="muted">Last updated: {date}</p>
    <h2>What we store</h2>
    <p>Journal entries, mood tags and progress scores you save, linked to your account.</p>
    <h2>AI requests</h2>
    <p>Situations you describe for a recovery plan are sent to our AI provider to generate
    guidance. They are not stored in our database.</p>
    <h2>Cookies</h2>
    <p>We use one cookie to keep you signed in and one short-lived cookie for on-screen messages.</p>
    <h2>Your choices</h2>
    <p>You can delete any journal entry at any time from your journal.</p>
</section>
"#,
        date = long_date(today)
    )
}

pub fn terms_body(today: chrono::NaiveDate) -> String {
    format!(
        r#"
<section class="card legal">
    <h1>Terms of Service</h1>
    <p class="muted">Last updated: {date}</p>
    <h2>Not medical advice</h2>
    <p>Content on Healing Horizons, including AI-generated guidance, is for support and
    self-reflection only and is not a substitute for professional diagnosis or treatment.</p>
    <h2>Emergencies</h2>
    <p>If you are thinking about harming yourself, contact a helpline immediately.</p>
    <h2>Community conduct</h2>
    <p>Be kind. Harassment and sharing others' private information are not allowed.</p>
</section>
"#,
        date = long_date(today)
    )
}

pub fn contact_body() -> String {
    r#"
<section class="card">
    <h1>Contact Us</h1>
    <p>Questions, feedback or partnership ideas? We respond within 24 hours.</p>
    <form id="contactForm" class="contact-form">
        <label for="name">Name</label>
        <input id="name" name="name" type="text" required>
        <label for="email">Email</label>
        <input id="email" name="email" type="email" required>
        <label for="subject">Subject</label>
        <input id="subject" name="subject" type="text">
        <label for="message">Message</label>
        <textarea id="message" name="message" rows="5" required></textarea>
        <button type="submit" class="button">Send Message</button>
    </form>
    <div id="contactResult" hidden></div>
</section>
"#
    .to_string()
}

/// Standalone 404 document
pub fn not_found_page() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Not Found - Healing Horizons</title>
    <link rel="stylesheet" href="/static/horizons.css">
</head>
<body>
    <main class="card">
        <h1>Page not found</h1>
        <p>What you were looking for is not here.</p>
        <p><a href="/" class="button">Back to Home</a></p>
    </main>
</body>
</html>
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{PersonaReply, Persona};
    use chrono::NaiveDate;

    fn entry(id: i64, content: &str) -> JournalEntry {
        JournalEntry {
            id,
            user_id: 1,
            content: content.to_string(),
            mood: Some("sad".to_string()),
            tags: Some("family, <b>".to_string()),
            created_at: NaiveDate::from_ymd_opt(2026, 2, 14)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_journal_escapes_entries() {
        let html = journal_body(&[entry(4, "<script>x</script>\nline two")]);
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;<br>line two"));
        assert!(html.contains(r#"action="/delete_entry/4""#));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("Past Entries (1)"));
    }

    #[test]
    fn test_results_render_markdown_and_badges() {
        let outcome = PlanOutcome {
            replies: vec![
                PersonaReply {
                    persona: Persona::Therapist,
                    content: "**Breathe**".to_string(),
                    source: ReplySource::Ai,
                },
                PersonaReply {
                    persona: Persona::Planner,
                    content: "plan".to_string(),
                    source: ReplySource::Fallback,
                },
            ],
            notice: None,
            plan: PlanDuration::FourteenDay,
        };
        let html = results_body(&outcome);
        assert!(html.contains("<strong>Breathe</strong>"));
        assert!(html.contains("AI generated"));
        assert!(html.contains("Expert guidance"));
        assert!(html.contains("14-Day Deep Healing"));
    }

    #[test]
    fn test_chart_scales_scores() {
        let series = ChartSeries {
            labels: vec!["Feb 14".to_string()],
            moods: vec![8],
            activity: vec![6],
        };
        let html = chart(&series);
        assert!(html.contains("height: 80%"));
        assert!(html.contains("height: 60%"));
        assert!(html.contains("Feb 14"));
    }

    #[test]
    fn test_legal_pages_show_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert!(privacy_body(date).contains("March 05, 2026"));
        assert!(terms_body(date).contains("March 05, 2026"));
    }
}
