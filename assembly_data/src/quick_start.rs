/*!

# Quick start

This example walks through the two halves of the library: turning a raw
export into typed polling stations, and resolving what a user may see.

**Normalizing an export** A raw export groups flat station records under one
`AC_<id>_FINAL` key per assembly. The readers in the command line tool build
a [`RawExport`](crate::RawExport) from a JSON or CSV file; here we build one
by hand:

```rust
use assembly_data::*;

let mut export = RawExport::default();
let mut record = RawRecord::new();
record.push("PS_NO_2021", RawValue::Number(1.0));
record.push("LOCALITY_EXTRACTED", RawValue::Text("POOVAM".to_string()));
record.push("POLLED_2021", RawValue::Number(824.0));
record.push("AINRC_2021_pct", RawValue::Number(43.2));
record.push("INC_2021_pct", RawValue::Text("31.46".to_string()));
record.push("NOTA_2021_pct", RawValue::Number(0.87));
export.push_record(AssemblyId::new("24"), record);

let stations = normalize_stations(&export, None);
assert_eq!(stations.len(), 1);
assert_eq!(stations[0].id, "24_1");
// NOTA is a reserved pseudo-candidate and never shows up as a party.
assert_eq!(stations[0].election2021.candidates.len(), 2);
```

Share and polled columns that carry placeholder text (a new booth with no
history, for instance) read as exactly `0` rather than failing — see
[`parse_numeric`](crate::parse_numeric).

**Resolving access** A stored user document resolves against the assembly
catalog into the lists and scopes the rendering layer branches on:

```rust
use assembly_data::*;

let user = UserRecord {
    role: Some("client".to_string()),
    accessible_assemblies: Some(vec!["24".to_string()]),
    accessible_pages: Some(vec!["overview".to_string()]),
    accessible_admin_sections: None,
};
let access = resolve_access(&user, &ASSEMBLIES);
assert_eq!(access.assemblies.len(), 1);
assert!(access.can_see_any_page());

let session = Session::sign_in(user);
assert_eq!(session.view(), ViewState::Normal);
assert_eq!(session.selected_assembly(), Some("24"));
```

Admin roles resolve to everything regardless of their allow-lists, and a
missing or unknown role fails closed to `client` with no access at all.

*/
