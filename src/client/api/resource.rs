//! Backend resource catalogue

/// A CRUD resource exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Resource {
    Foreigners,
    /// Read-only join of foreigners and their current visa
    ForeignersWithVisas,
    Visas,
    Overstays,
    Refugees,
    OutOfViewCases,
    Grievances,
    CitizenshipRequests,
    Notifications,
    Users,
    Organizations,
}

impl Resource {
    /// Collection path, exactly as the backend routes it
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Foreigners => "/foreigners",
            Resource::ForeignersWithVisas => "/foreigners-with-visas",
            Resource::Visas => "/visas",
            Resource::Overstays => "/overstays",
            Resource::Refugees => "/refugees",
            Resource::OutOfViewCases => "/out-of-view-cases/",
            Resource::Grievances => "/grievances",
            Resource::CitizenshipRequests => "/citizenship-requests",
            Resource::Notifications => "/notifications",
            Resource::Users => "/users",
            Resource::Organizations => "/organizations",
        }
    }

    /// Path of a single record
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path().trim_end_matches('/'), id)
    }

    /// Singular noun for messages, e.g. "refugee id"
    pub fn id_label(&self) -> &'static str {
        match self {
            Resource::Foreigners | Resource::ForeignersWithVisas => "foreigner id",
            Resource::Visas => "visa id",
            Resource::Overstays => "overstay id",
            Resource::Refugees => "refugee id",
            Resource::OutOfViewCases => "case id",
            Resource::Grievances => "grievance id",
            Resource::CitizenshipRequests => "citizenship request id",
            Resource::Notifications => "notification id",
            Resource::Users => "user id",
            Resource::Organizations => "organization id",
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Resource::ForeignersWithVisas)
    }

    /// Fields shown in listings that default to "N/A" when absent
    pub fn display_fields(&self) -> &'static [&'static str] {
        match self {
            Resource::Foreigners => &["passport_number", "nationality", "phone_number", "address"],
            Resource::ForeignersWithVisas => &[
                "passport_number",
                "nationality",
                "visa_type",
                "visa_number",
                "visa_status",
                "visa_expiry_date",
            ],
            Resource::Visas => &["visa_number", "visa_type", "issue_date", "expiry_date", "status"],
            Resource::Overstays => &["visa_number", "expiry_date", "days_overstayed", "status"],
            Resource::Refugees => &[
                "case_number",
                "country_of_origin",
                "status",
                "registration_date",
            ],
            Resource::OutOfViewCases => &[
                "case_number",
                "last_known_location",
                "status",
                "reported_date",
            ],
            Resource::Grievances => &["subject", "status", "submitted_at"],
            Resource::CitizenshipRequests => &["application_number", "status", "submitted_at"],
            Resource::Notifications => &[],
            Resource::Users => &["email", "full_name", "role", "organization_name"],
            Resource::Organizations => &["name", "type", "contact_email"],
        }
    }

    /// Request-body fields sent as ISO dates
    pub fn date_fields(&self) -> &'static [&'static str] {
        match self {
            Resource::Foreigners => &["date_of_birth", "arrival_date"],
            Resource::Visas => &["issue_date", "expiry_date"],
            Resource::Overstays => &["expiry_date", "detected_date"],
            Resource::Refugees => &["date_of_birth", "registration_date"],
            Resource::OutOfViewCases => &["reported_date", "last_seen_date"],
            Resource::CitizenshipRequests => &["application_date"],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_strips_trailing_slash() {
        assert_eq!(Resource::OutOfViewCases.path(), "/out-of-view-cases/");
        assert_eq!(Resource::OutOfViewCases.item_path("7"), "/out-of-view-cases/7");
        assert_eq!(Resource::Refugees.item_path("12"), "/refugees/12");
    }

    #[test]
    fn test_only_joined_view_is_read_only() {
        assert!(Resource::ForeignersWithVisas.is_read_only());
        assert!(!Resource::Foreigners.is_read_only());
    }
}
