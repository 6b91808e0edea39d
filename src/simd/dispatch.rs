use std::fmt;

/// Identifies a SIMD policy at runtime.
///
/// The controller resolves one kind at construction and keeps it for the lifetime of
/// the simulation. Each kind maps to one monomorphized force kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// 16 lanes, AVX-512F.
    Wide,
    /// 8 lanes, AVX2.
    Narrow,
    /// 1 lane, portable.
    Scalar,
}

impl PolicyKind {
    /// Widest lane count of any policy.
    pub const MAX_WIDTH: usize = 16;

    /// All kinds, widest first.
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Wide, PolicyKind::Narrow, PolicyKind::Scalar];

    pub fn width(self) -> usize {
        match self {
            PolicyKind::Wide => 16,
            PolicyKind::Narrow => 8,
            PolicyKind::Scalar => 1,
        }
    }

    /// Byte alignment used for every buffer of a store laid out for this policy.
    pub fn alignment(self) -> usize {
        match self {
            PolicyKind::Wide => 64,
            PolicyKind::Narrow => 32,
            PolicyKind::Scalar => 16,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Wide => "wide",
            PolicyKind::Narrow => "narrow",
            PolicyKind::Scalar => "scalar",
        }
    }

    pub fn instruction_set(self) -> &'static str {
        match self {
            PolicyKind::Wide => "AVX-512F",
            PolicyKind::Narrow => "AVX2",
            PolicyKind::Scalar => "none",
        }
    }

    /// Whether this build and this host can run the policy.
    pub fn is_supported(self) -> bool {
        match self {
            PolicyKind::Wide => {
                #[cfg(all(target_arch = "x86_64", feature = "avx512-simd"))]
                {
                    is_x86_feature_detected!("avx512f")
                }
                #[cfg(not(all(target_arch = "x86_64", feature = "avx512-simd")))]
                {
                    false
                }
            }
            PolicyKind::Narrow => {
                #[cfg(target_arch = "x86_64")]
                {
                    is_x86_feature_detected!("avx2")
                }
                #[cfg(not(target_arch = "x86_64"))]
                {
                    false
                }
            }
            PolicyKind::Scalar => true,
        }
    }

    /// Widest supported policy.
    ///
    /// ```
    /// use rs_nbody::simd::PolicyKind;
    ///
    /// let kind = PolicyKind::detect();
    /// assert!(kind.is_supported());
    /// ```
    pub fn detect() -> PolicyKind {
        Self::ALL
            .into_iter()
            .find(|kind| kind.is_supported())
            .unwrap_or(PolicyKind::Scalar)
    }

    /// Every supported policy, widest first. Always contains [`PolicyKind::Scalar`].
    pub fn available() -> Vec<PolicyKind> {
        Self::ALL.into_iter().filter(|kind| kind.is_supported()).collect()
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} x f32, {})", self.name(), self.width(), self.instruction_set())
    }
}
