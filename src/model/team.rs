/// A team as referenced by the upstream feeds. The three-letter abbreviation
/// is the canonical identity key; place and nick are whatever the schedule
/// document happened to carry, and may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    pub abbrev: String,
    pub place: Option<String>,
    pub nick: Option<String>,
}

impl TeamRef {
    pub fn new(abbrev: impl Into<String>) -> Self {
        Self {
            abbrev: abbrev.into().to_uppercase(),
            place: None,
            nick: None,
        }
    }

    /// Place preferred from the feed, falling back to the static table.
    pub fn place_name(&self) -> Option<&str> {
        self.place
            .as_deref()
            .or_else(|| team_info(&self.abbrev).map(|t| t.place))
    }

    pub fn nick_name(&self) -> Option<&str> {
        self.nick
            .as_deref()
            .or_else(|| team_info(&self.abbrev).map(|t| t.nick))
    }

    /// Russian display name, or the abbreviation when the team is unknown.
    pub fn name_ru(&self) -> &str {
        match team_info(&self.abbrev) {
            Some(t) => t.name_ru,
            None => &self.abbrev,
        }
    }

    pub fn emoji(&self) -> &str {
        team_info(&self.abbrev).map(|t| t.emoji).unwrap_or("🏒")
    }
}

/// Static franchise data keyed by abbreviation.
#[derive(Debug, Clone, Copy)]
pub struct TeamInfo {
    pub abbrev: &'static str,
    pub place: &'static str,
    pub nick: &'static str,
    pub name_ru: &'static str,
    pub emoji: &'static str,
}

pub static TEAMS: &[TeamInfo] = &[
    TeamInfo { abbrev: "ANA", place: "Anaheim", nick: "Ducks", name_ru: "Анахайм", emoji: "🦆" },
    TeamInfo { abbrev: "BOS", place: "Boston", nick: "Bruins", name_ru: "Бостон", emoji: "🐻" },
    TeamInfo { abbrev: "BUF", place: "Buffalo", nick: "Sabres", name_ru: "Баффало", emoji: "⚔️" },
    TeamInfo { abbrev: "CGY", place: "Calgary", nick: "Flames", name_ru: "Калгари", emoji: "🔥" },
    TeamInfo { abbrev: "CAR", place: "Carolina", nick: "Hurricanes", name_ru: "Каролина", emoji: "🌀" },
    TeamInfo { abbrev: "CHI", place: "Chicago", nick: "Blackhawks", name_ru: "Чикаго", emoji: "🪶" },
    TeamInfo { abbrev: "COL", place: "Colorado", nick: "Avalanche", name_ru: "Колорадо", emoji: "⛰️" },
    TeamInfo { abbrev: "CBJ", place: "Columbus", nick: "Blue Jackets", name_ru: "Коламбус", emoji: "💙" },
    TeamInfo { abbrev: "DAL", place: "Dallas", nick: "Stars", name_ru: "Даллас", emoji: "⭐" },
    TeamInfo { abbrev: "DET", place: "Detroit", nick: "Red Wings", name_ru: "Детройт", emoji: "🔴" },
    TeamInfo { abbrev: "EDM", place: "Edmonton", nick: "Oilers", name_ru: "Эдмонтон", emoji: "🛢️" },
    TeamInfo { abbrev: "FLA", place: "Florida", nick: "Panthers", name_ru: "Флорида", emoji: "🐆" },
    TeamInfo { abbrev: "LAK", place: "Los Angeles", nick: "Kings", name_ru: "Лос-Анджелес", emoji: "👑" },
    TeamInfo { abbrev: "MIN", place: "Minnesota", nick: "Wild", name_ru: "Миннесота", emoji: "🌲" },
    TeamInfo { abbrev: "MTL", place: "Montreal", nick: "Canadiens", name_ru: "Монреаль", emoji: "⚜️" },
    TeamInfo { abbrev: "NSH", place: "Nashville", nick: "Predators", name_ru: "Нэшвилл", emoji: "🎸" },
    TeamInfo { abbrev: "NJD", place: "New Jersey", nick: "Devils", name_ru: "Нью-Джерси", emoji: "😈" },
    TeamInfo { abbrev: "NYI", place: "New York", nick: "Islanders", name_ru: "Айлендерс", emoji: "🏝️" },
    TeamInfo { abbrev: "NYR", place: "New York", nick: "Rangers", name_ru: "Рейнджерс", emoji: "🗽" },
    TeamInfo { abbrev: "OTT", place: "Ottawa", nick: "Senators", name_ru: "Оттава", emoji: "🏛️" },
    TeamInfo { abbrev: "PHI", place: "Philadelphia", nick: "Flyers", name_ru: "Филадельфия", emoji: "🧡" },
    TeamInfo { abbrev: "PIT", place: "Pittsburgh", nick: "Penguins", name_ru: "Питтсбург", emoji: "🐧" },
    TeamInfo { abbrev: "SJS", place: "San Jose", nick: "Sharks", name_ru: "Сан-Хосе", emoji: "🦈" },
    TeamInfo { abbrev: "SEA", place: "Seattle", nick: "Kraken", name_ru: "Сиэтл", emoji: "🐙" },
    TeamInfo { abbrev: "STL", place: "St. Louis", nick: "Blues", name_ru: "Сент-Луис", emoji: "🎷" },
    TeamInfo { abbrev: "TBL", place: "Tampa Bay", nick: "Lightning", name_ru: "Тампа-Бэй", emoji: "⚡" },
    TeamInfo { abbrev: "TOR", place: "Toronto", nick: "Maple Leafs", name_ru: "Торонто", emoji: "🍁" },
    TeamInfo { abbrev: "UTA", place: "Utah", nick: "Mammoth", name_ru: "Юта", emoji: "🦣" },
    TeamInfo { abbrev: "VAN", place: "Vancouver", nick: "Canucks", name_ru: "Ванкувер", emoji: "🐋" },
    TeamInfo { abbrev: "VGK", place: "Vegas", nick: "Golden Knights", name_ru: "Вегас", emoji: "🛡️" },
    TeamInfo { abbrev: "WSH", place: "Washington", nick: "Capitals", name_ru: "Вашингтон", emoji: "🦅" },
    TeamInfo { abbrev: "WPG", place: "Winnipeg", nick: "Jets", name_ru: "Виннипег", emoji: "✈️" },
];

pub fn team_info(abbrev: &str) -> Option<&'static TeamInfo> {
    TEAMS.iter().find(|t| t.abbrev.eq_ignore_ascii_case(abbrev))
}
