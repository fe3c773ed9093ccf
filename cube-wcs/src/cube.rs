use crate::celestial::CelestialWcs;
use crate::header::WcsKeyword;
use crate::spectral::SpectralWcs;

/// Metadata record for a cube: the spatial axes as axes 1 and 2 and, when
/// given, the spectral axis as axis 3.
///
/// The spatial part is always written with a CD matrix, so the spectral axis
/// uses `CD3_3` with zero cross terms. `NAXIS` and `NAXIS3` are added when the
/// spectral length is known.
pub fn cube_keywords(celestial: &CelestialWcs, spectral: Option<&SpectralWcs>) -> Vec<WcsKeyword> {
    let mut spatial = celestial.to_keywords();
    let Some(wave) = spectral else {
        return spatial;
    };
    spatial.retain(|k| k.name != "WCSAXES");

    let (mut keywords, spectral_rest): (Vec<_>, Vec<_>) = wave
        .to_keywords(3, true)
        .into_iter()
        .partition(|k| k.name == "WCSAXES");
    keywords.extend(spatial);
    keywords.extend(spectral_rest);
    if let Some(len) = wave.shape() {
        keywords.push(WcsKeyword::integer("NAXIS", 3));
        keywords.push(WcsKeyword::integer("NAXIS3", len as i64));
    }
    keywords
}
