use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Industry grouping used by the company directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, Display, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Sector {
    Software,
    Aerospace,
    Agriculture,
    Financial,
    Retail,
    Healthcare,
    Energy,
    Consulting,
}

/// A regional employer with a careers page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Company {
    pub name: &'static str,
    pub career_url: &'static str,
    pub sector: Sector,
}

const fn company(name: &'static str, career_url: &'static str, sector: Sector) -> Company {
    Company {
        name,
        career_url,
        sector,
    }
}

pub const COMPANY_DIRECTORY: &[Company] = &[
    company("Workiva", "https://www.workiva.com/careers", Sector::Software),
    company(
        "National Information Solutions Cooperative (NISC)",
        "https://www.nisc.coop/careers",
        Sector::Software,
    ),
    company("Source Allies", "https://sourceallies.com/careers", Sector::Software),
    company("P3 Uplift", "https://www.p3uplift.com/careers", Sector::Software),
    company("Lean Techniques", "https://www.leantechniques.com/careers", Sector::Software),
    company("Dwolla", "https://www.dwolla.com/careers", Sector::Software),
    company("Roboflow", "https://roboflow.com/careers", Sector::Software),
    company("Perficient", "https://www.perficient.com/careers", Sector::Software),
    company("Buildertrend", "https://buildertrend.com/careers", Sector::Software),
    company("Zirous", "https://www.zirous.com/careers", Sector::Software),
    company("ProCircular", "https://www.procircular.com/careers", Sector::Software),
    company("Pratum", "https://www.intrust-it.com/careers", Sector::Software),
    company("Aureon", "https://www.aureon.com/careers", Sector::Software),
    company(
        "Collins Aerospace",
        "https://careers.rtx.com/global/en/collins-aerospace",
        Sector::Aerospace,
    ),
    company("BAE Systems", "https://jobs.baesystems.com", Sector::Aerospace),
    company(
        "John Deere",
        "https://www.deere.com/en/our-company/john-deere-careers",
        Sector::Agriculture,
    ),
    company("Corteva Agriscience", "https://careers.corteva.com", Sector::Agriculture),
    company("Kinze Manufacturing", "https://www.kinze.com/careers", Sector::Agriculture),
    company("Vermeer Corporation", "https://www.vermeer.com/na/careers", Sector::Agriculture),
    company(
        "Principal Financial Group",
        "https://www.principal.com/about-us/careers",
        Sector::Financial,
    ),
    company("Wellmark", "https://www.wellmark.com/about/careers", Sector::Financial),
    company("American Equity", "https://www.american-equity.com/careers", Sector::Financial),
    company("EMC Insurance", "https://www.emcins.com/careers", Sector::Financial),
    company("Grinnell Mutual", "https://www.grinnellmutual.com/careers", Sector::Financial),
    company("Farm Bureau Financial Services", "https://www.fbfs.com/careers", Sector::Financial),
    company("GuideOne Insurance", "https://www.guideone.com/careers", Sector::Financial),
    company("Delta Dental of Iowa", "https://www.deltadentalia.com/careers", Sector::Financial),
    company("SHAZAM", "https://www.shazam.net/careers", Sector::Financial),
    company("Casey's General Stores", "https://www.caseys.com/careers", Sector::Retail),
    company("Hy-Vee", "https://www.hy-vee.com/careers", Sector::Retail),
    company("Kum & Go", "https://www.kumandgo.com/careers", Sector::Retail),
    company("Pella Corporation", "https://www.pella.com/careers", Sector::Retail),
    company("UnityPoint Health", "https://www.unitypoint.org/careers", Sector::Healthcare),
    company("MercyOne", "https://www.mercyone.org/careers", Sector::Healthcare),
    company("MidAmerican Energy", "https://www.midamericanenergy.com/careers", Sector::Energy),
    company("Alliant Energy", "https://www.alliantenergy.com/careers", Sector::Energy),
    company("Accenture", "https://www.accenture.com/us-en/careers", Sector::Consulting),
    company("Deloitte", "https://www2.deloitte.com/us/en/careers.html", Sector::Consulting),
];

/// Employers most actively hiring for tech roles, highest priority first.
pub const PRIORITY_EMPLOYERS: &[&str] = &[
    "Workiva",
    "National Information Solutions Cooperative (NISC)",
    "Principal Financial Group",
    "Collins Aerospace",
    "John Deere",
    "Wellmark",
    "Source Allies",
    "Dwolla",
    "Casey's General Stores",
    "Hy-Vee",
    "UnityPoint Health",
    "MidAmerican Energy",
    "Corteva Agriscience",
    "Perficient",
    "Lean Techniques",
    "Buildertrend",
];

/// Companies in one sector, in directory order.
pub fn companies_in(sector: Sector) -> Vec<&'static Company> {
    COMPANY_DIRECTORY
        .iter()
        .filter(|c| c.sector == sector)
        .collect()
}

/// Directory grouped by sector, skipping sectors without entries.
pub fn companies_by_sector() -> Vec<(Sector, Vec<&'static Company>)> {
    Sector::iter()
        .map(|sector| (sector, companies_in(sector)))
        .filter(|(_, companies)| !companies.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_covers_directory() {
        let grouped = companies_by_sector();
        let total: usize = grouped.iter().map(|(_, c)| c.len()).sum();
        assert_eq!(total, COMPANY_DIRECTORY.len());
        assert_eq!(grouped[0].0, Sector::Software);
        assert_eq!(grouped[0].1[0].name, "Workiva");
    }

    #[test]
    fn test_sector_parse() {
        assert_eq!("energy".parse::<Sector>().unwrap(), Sector::Energy);
        assert_eq!(companies_in(Sector::Healthcare).len(), 2);
    }

    #[test]
    fn test_priority_employers_unique() {
        let mut names: Vec<_> = PRIORITY_EMPLOYERS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PRIORITY_EMPLOYERS.len());
    }
}
