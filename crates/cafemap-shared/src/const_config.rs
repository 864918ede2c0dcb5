//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub const PANIC_ON_RARE_ERR: bool = true;

pub mod client {
    /// Key the auth token is persisted under between runs
    pub const STORAGE_KEY_AUTH_TOKEN: &str = "auth_token";
    /// Scheme the backend expects on the `Authorization` header
    pub const AUTH_HEADER_SCHEME: &str = "Token";
    pub const DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8000";
}

pub mod filter {
    /// Sentinel meaning "no filter applied" for the category dimensions
    pub const CATEGORY_ALL: &str = "전체";
    pub const DEFAULT_REGION: &str = "마포구";
    /// `서울시 전체` is passed through; the backend treats it as no region filter
    pub const REGION_CHOICES: &[&str] = &[
        "서울시 전체",
        "마포구",
        "강남구",
        "서대문구",
        "용산구",
        "영등포구",
        "종로구",
    ];
    pub const MAJOR_CATEGORY_CHOICES: &[&str] = &["전체", "프랜차이즈", "개인"];
    pub const MID_CATEGORY_CHOICES: &[&str] = &["전체", "커피전문점", "디저트", "베이커리"];
    pub const FRANCHISE_CHIPS: &[&str] = &["스타벅스", "이디야", "투썸플레이스", "메가커피"];
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_ACCOUNTS_LOGIN: PathSpec = PathSpec::post("/api/accounts/users/login/");
    pub const PATH_ACCOUNTS_LOGOUT: PathSpec = PathSpec::post("/api/accounts/users/logout/");
    pub const PATH_ACCOUNTS_ME: PathSpec = PathSpec::get("/api/accounts/users/me/");
    pub const PATH_CAFES_FILTERED_DATA: PathSpec = PathSpec::get("/api/cafes/cafes/filtered_data/");
    pub const PATH_CAFES_REGION_STATS: PathSpec = PathSpec::get("/api/cafes/cafes/region_stats/");
}

#[cfg(test)]
mod tests {
    use static_assertions::const_assert;

    use super::filter::{
        CATEGORY_ALL, DEFAULT_REGION, MAJOR_CATEGORY_CHOICES, MID_CATEGORY_CHOICES, REGION_CHOICES,
    };

    const_assert!(REGION_CHOICES.len() > 1);

    #[test]
    fn category_lists_start_with_the_all_sentinel() {
        // The default selection has to mean "no filter"
        assert_eq!(MAJOR_CATEGORY_CHOICES[0], CATEGORY_ALL);
        assert_eq!(MID_CATEGORY_CHOICES[0], CATEGORY_ALL);
    }

    #[test]
    fn default_region_is_offered() {
        assert!(REGION_CHOICES.contains(&DEFAULT_REGION));
    }
}
