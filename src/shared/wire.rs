/// Enums whose values travel as upper-snake strings (`PUBLISHED`, `KEPALA_DESA`).
pub trait WireEnum: Sized + Copy + 'static {
    fn as_str(&self) -> &'static str;

    /// Lenient parse: case-insensitive, `-` and spaces read as `_`
    fn from_wire(raw: &str) -> Option<Self>;
}

/// Declares a wire enum with serde renames, `as_str`, lenient parsing and `Display`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::shared::wire::WireEnum for $name {
            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            fn from_wire(raw: &str) -> Option<Self> {
                let normalized = raw.trim().to_ascii_uppercase().replace(['-', ' '], "_");
                match normalized.as_str() {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::shared::wire::WireEnum::as_str(self))
            }
        }
    };
}

pub(crate) use wire_enum;

#[cfg(test)]
mod tests {
    use super::*;

    wire_enum! {
        enum Sample {
            KepalaDesa => "KEPALA_DESA",
            Bpd => "BPD",
        }
    }

    #[test]
    fn test_from_wire_is_lenient() {
        assert_eq!(Sample::from_wire("KEPALA_DESA"), Some(Sample::KepalaDesa));
        assert_eq!(Sample::from_wire("kepala-desa"), Some(Sample::KepalaDesa));
        assert_eq!(Sample::from_wire(" bpd "), Some(Sample::Bpd));
        assert_eq!(Sample::from_wire(""), None);
        assert_eq!(Sample::from_wire("LURAH"), None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Sample::KepalaDesa).unwrap();
        assert_eq!(json, "\"KEPALA_DESA\"");
        assert_eq!(Sample::Bpd.to_string(), "BPD");
        assert_eq!(Sample::ALL.len(), 2);
    }
}
