// src/useragents/models.rs
use crate::extractors::TableKind;

/// Where a category's entries live on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    /// A table following the anchor element.
    Table(TableKind),
    /// A JSON array inside the anchor container.
    Embedded,
}

/// One fixed category scraped from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub anchor: &'static str,
    pub label: &'static str,
    /// Output path relative to the output directory.
    pub file: &'static str,
    pub source: CategorySource,
}

const fn latest(anchor: &'static str, label: &'static str, file: &'static str) -> Category {
    Category { anchor, label, file, source: CategorySource::Table(TableKind::Latest) }
}

pub const TABLE_CATEGORIES: [Category; 10] = [
    Category {
        anchor: "most-common-desktop-useragents",
        label: "most_common_desktop",
        file: "common/desktop.json",
        source: CategorySource::Table(TableKind::CommonDesktop),
    },
    Category {
        anchor: "most-common-mobile-useragents",
        label: "most_common_mobile",
        file: "common/mobile.json",
        source: CategorySource::Table(TableKind::CommonMobile),
    },
    latest("latest-windows-desktop-useragents", "latest_windows_desktop", "latest/windows.json"),
    latest("latest-mac-desktop-useragents", "latest_mac_desktop", "latest/mac.json"),
    latest("latest-linux-desktop-useragents", "latest_linux_desktop", "latest/linux.json"),
    latest("latest-iphone-useragents", "latest_iphone", "latest/iphone.json"),
    latest("latest-ipod-useragents", "latest_ipod", "latest/ipod.json"),
    latest("latest-ipad-useragents", "latest_ipad", "latest/ipad.json"),
    latest("latest-android-mobile-useragents", "latest_android_mobile", "latest/android.json"),
    latest("latest-tablet-useragents", "latest_tablet", "latest/tablet.json"),
];

pub const EMBEDDED_CATEGORIES: [Category; 2] = [
    Category {
        anchor: "most-common-desktop-useragents-json-csv",
        label: "most_common_desktop",
        file: "common-desktop.json",
        source: CategorySource::Embedded,
    },
    Category {
        anchor: "most-common-mobile-useragents-json-csv",
        label: "most_common_mobile",
        file: "common-mobile.json",
        source: CategorySource::Embedded,
    },
];
