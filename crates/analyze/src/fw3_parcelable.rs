//! FW3/FW8 -- Parcelable implementations.
//!
//! A Parcelable must expose `CREATOR`, `writeToParcel()` and
//! `describeContents()`, must be final, and must not offer a raw
//! `(android.os.Parcel)` constructor. Members inherited from the baseline
//! counterpart count towards the requirements.

use crate::rules::{Findings, Rule};
use apilint_core::ClassView;

pub struct ParcelableRule;

impl Rule for ParcelableRule {
    fn ids(&self) -> &'static [&'static str] {
        &["FW3", "FW8"]
    }

    fn describe(&self) -> &'static str {
        "Parcelable classes are final and expose CREATOR, writeToParcel and describeContents"
    }

    fn check(&self, view: &ClassView<'_>, findings: &mut Findings<'_>) {
        if view.implements.as_deref() != Some("android.os.Parcelable") {
            return;
        }
        let class = view.class;

        let creator = view.fields().any(|f| f.name == "CREATOR");
        let write = view.plain_methods().any(|m| m.name == "writeToParcel");
        let describe = view.plain_methods().any(|m| m.name == "describeContents");
        if !(creator && write && describe) {
            findings.error(
                class,
                None,
                "FW3",
                "Parcelable requires CREATOR, writeToParcel, and describeContents; missing one",
            );
        }

        if !class.modifiers.contains("final") {
            findings.error(class, None, "FW8", "Parcelable classes must be final");
        }

        for ctor in view.constructors() {
            if ctor.arg_types() == ["android.os.Parcel"] {
                findings.error(
                    class,
                    Some(ctor),
                    "FW3",
                    "Parcelable inflation is exposed through CREATOR, not raw constructors",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LintConfig;
    use crate::rules::testing::{check_one, classes, rule_ids};

    #[test]
    fn complete_final_parcelable_passes() {
        let report = check_one(
            &ParcelableRule,
            "// Signature format: 2.0
package android.app {
  public final class WallpaperColors implements android.os.Parcelable {
    ctor public WallpaperColors();
    method public int describeContents();
    method public void writeToParcel(android.os.Parcel, int);
    field public static final android.os.Parcelable.Creator<android.app.WallpaperColors> CREATOR;
  }
}",
        );
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn raw_parcel_constructor_is_flagged() {
        let report = check_one(
            &ParcelableRule,
            "// Signature format: 2.0
package android.app {
  public final class WallpaperColors implements android.os.Parcelable {
    ctor public WallpaperColors(android.os.Parcel);
    method public int describeContents();
    method public void writeToParcel(android.os.Parcel, int);
    field public static final android.os.Parcelable.Creator<android.app.WallpaperColors> CREATOR;
  }
}",
        );
        assert_eq!(rule_ids(&report), vec!["FW3"]);
        let v = &report.failures["FW3"][0];
        assert_eq!(v.member.as_deref(), Some("ctor-WallpaperColors-android.os.Parcel"));
        assert_eq!(v.line, 4);
    }

    #[test]
    fn missing_members_and_non_final() {
        let report = check_one(
            &ParcelableRule,
            "package android.app {
  public class Thing implements android.os.Parcelable {
    method public int describeContents();
  }
}",
        );
        assert_eq!(rule_ids(&report), vec!["FW3", "FW8"]);
    }

    #[test]
    fn other_interfaces_are_ignored() {
        let report = check_one(
            &ParcelableRule,
            "package p {
  public class A implements java.lang.Runnable {
  }
}",
        );
        assert!(report.is_clean());
    }

    #[test]
    fn baseline_members_satisfy_requirements() {
        let current = classes(
            "package android.app {
  public final class WallpaperColors implements android.os.Parcelable {
    method public int getSomething();
  }
}",
        );
        let base = classes(
            "package android.app {
  public final class WallpaperColors implements android.os.Parcelable {
    ctor public WallpaperColors();
    method public int describeContents();
    method public void writeToParcel(android.os.Parcel, int);
    field public static final android.os.Parcelable.Creator<android.app.WallpaperColors> CREATOR;
  }
}",
        );
        let config = LintConfig::default();
        let mut findings = Findings::new(&config);
        ParcelableRule.check(&ClassView::new(&current[0], Some(&base[0])), &mut findings);
        assert!(findings.into_report().is_clean());
    }
}
