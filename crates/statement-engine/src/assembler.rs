//! Statement document assembly
//!
//! Orders the records, turns each one into a `NormalizedEvent`, and adds the
//! header and introduction. Pure apart from the injected clock.

use crate::config::fill;
use crate::normalizer::normalize_sentence;
use crate::{evidence, location, medical, sequencer, temporal, StatementEngine};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use shared_types::{
    IncidentRecord, NormalizedEvent, PlanPolicy, StatementDocument, StatementHeader, UserProfile,
    WeatherSnapshot,
};

impl StatementEngine {
    /// Build the statement document from a record snapshot
    pub fn assemble(&self, records: &[IncidentRecord], profile: &UserProfile) -> StatementDocument {
        let events: Vec<NormalizedEvent> = sequencer::sequence(records)
            .into_iter()
            .map(|(key, record)| self.build_event(key, record))
            .collect();

        let header = self.build_header(profile);
        let introduction = self.build_introduction(&events);

        tracing::info!(
            events = events.len(),
            issued_on = %header.issued_on,
            "assembled statement document"
        );

        StatementDocument {
            header,
            introduction,
            events,
            plan_policy: PlanPolicy::full(),
        }
    }

    /// Transform one record; `occurred_at` is its sequencing key
    pub fn build_event(&self, occurred_at: DateTime<Utc>, record: &IncidentRecord) -> NormalizedEvent {
        let locale = self.config.locale;
        let phrasing = &self.config.phrasing;

        let date = temporal::format_date(&record.date, locale);
        let time = temporal::format_time(&record.time, locale);
        let place = location::strip_annotation(&record.location);

        let base = self.statement_sentence(record, &date, &time, &place);
        let appendix = medical::build_appendix(
            record.medical.as_ref(),
            &phrasing.medical,
            self.normalizer.terminal(),
        );
        let detail = if appendix.is_empty() {
            base
        } else {
            format!("{} {}", base, appendix)
        };

        let evidence = evidence::has_evidence(
            &record.attachments,
            record.medical.as_ref(),
            &phrasing.medical.default_visit_type,
        );

        tracing::debug!(%occurred_at, evidence, "built event");

        NormalizedEvent {
            date,
            time,
            location: place,
            category: record.category.trim().to_string(),
            detail,
            evidence,
            attachments: record.attachments.clone(),
            occurred_at,
        }
    }

    /// `<date>, <time>, at <place>, <actor clause> (<notes>).`
    fn statement_sentence(
        &self,
        record: &IncidentRecord,
        date: &str,
        time: &str,
        place: &str,
    ) -> String {
        let phrasing = &self.config.phrasing;
        let mut sentence = String::new();

        let head: Vec<&str> = [date, time].into_iter().filter(|s| !s.is_empty()).collect();
        if !head.is_empty() {
            sentence.push_str(&head.join(&phrasing.clause_separator));
            sentence.push_str(&phrasing.clause_separator);
        }
        if !place.is_empty() {
            sentence.push_str(&fill(&phrasing.location_phrase, &[("location", place)]));
        }

        sentence.push_str(&self.normalizer.clause(&record.content));

        let notes = self.notes(record);
        if !notes.is_empty() {
            let joined = notes.join(&phrasing.note_separator);
            sentence.push_str(&fill(&phrasing.notes_wrapper, &[("notes", joined.as_str())]));
        }

        normalize_sentence(&sentence, self.normalizer.terminal())
    }

    fn notes(&self, record: &IncidentRecord) -> Vec<String> {
        let phrasing = &self.config.phrasing;
        let mut notes = Vec::new();

        let gps = location::location_note(&record.location, &phrasing.gps_marker, &phrasing.gps_note);
        if !gps.is_empty() {
            notes.push(gps);
        }
        if let Some(weather) = record.weather.as_ref().map(|w| self.weather_note(w)) {
            if !weather.is_empty() {
                notes.push(weather);
            }
        }

        notes
    }

    fn weather_note(&self, weather: &WeatherSnapshot) -> String {
        let phrasing = &self.config.phrasing;
        let details: Vec<String> = [
            (weather.temperature, &phrasing.temperature),
            (weather.wind_speed, &phrasing.wind_speed),
        ]
        .into_iter()
        .filter_map(|(value, template)| {
            value
                .filter(|v| v.is_finite())
                .map(|v| fill(template, &[("value", v.to_string().as_str())]))
        })
        .collect();

        if details.is_empty() {
            return String::new();
        }
        let joined = details.join(&phrasing.note_separator);
        fill(&phrasing.weather_note, &[("details", joined.as_str())])
    }

    fn build_header(&self, profile: &UserProfile) -> StatementHeader {
        let issued_on = self.issue_date();
        StatementHeader {
            issue_date: temporal::format_calendar_date(issued_on, self.config.locale),
            issued_on,
            court_placeholder: self.config.phrasing.court_placeholder.clone(),
            author_name: profile.display_name(),
        }
    }

    fn issue_date(&self) -> NaiveDate {
        let offset = FixedOffset::east_opt(self.config.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| {
                tracing::warn!(
                    minutes = self.config.utc_offset_minutes,
                    "UTC offset out of range, using UTC"
                );
                Utc.fix()
            });
        self.clock.now().with_timezone(&offset).date_naive()
    }

    fn build_introduction(&self, events: &[NormalizedEvent]) -> String {
        let phrasing = &self.config.phrasing;
        let count = events.len().to_string();

        let summary = match (events.first(), events.last()) {
            (Some(first), Some(last)) => fill(
                &phrasing.record_period,
                &[
                    ("first", first.date.as_str()),
                    ("last", last.date.as_str()),
                    ("count", count.as_str()),
                ],
            ),
            _ => fill(&phrasing.record_count, &[("count", count.as_str())]),
        };

        format!("{}{}", phrasing.introduction, summary).trim().to_string()
    }
}
