// Delte testfixturer: plausible frames for de tre øvelsene.
// Koordinatene er normaliserte (y vokser nedover), synlighet 0.9.
#![allow(dead_code)]

use posecoach_core::landmark::{Landmark, LandmarkFrame, LandmarkIndex};

pub struct FrameBuilder {
    records: Vec<Landmark>,
}

impl FrameBuilder {
    /// Stående grunnpositur, alle 33 punkter.
    pub fn standing() -> Self {
        let coords: [(f64, f64); 33] = [
            (0.50, 0.20), // nese
            (0.48, 0.19),
            (0.47, 0.19),
            (0.46, 0.19),
            (0.52, 0.19),
            (0.53, 0.19),
            (0.54, 0.19),
            (0.45, 0.20), // ører
            (0.55, 0.20),
            (0.48, 0.23), // munn
            (0.52, 0.23),
            (0.42, 0.30), // skuldre
            (0.58, 0.30),
            (0.40, 0.42), // albuer
            (0.60, 0.42),
            (0.39, 0.54), // håndledd
            (0.61, 0.54),
            (0.385, 0.57), // lillefingre
            (0.615, 0.57),
            (0.38, 0.57), // pekefingre
            (0.62, 0.57),
            (0.39, 0.56), // tomler
            (0.61, 0.56),
            (0.44, 0.55), // hofter
            (0.56, 0.55),
            (0.44, 0.72), // knær
            (0.56, 0.72),
            (0.44, 0.89), // ankler
            (0.56, 0.89),
            (0.43, 0.92), // hæler
            (0.57, 0.92),
            (0.45, 0.94), // fotspisser
            (0.55, 0.94),
        ];
        let records = coords
            .iter()
            .map(|&(x, y)| Landmark::new(x, y, 0.0, 0.9))
            .collect();
        Self { records }
    }

    pub fn set(mut self, idx: LandmarkIndex, x: f64, y: f64) -> Self {
        let lm = &mut self.records[idx as usize];
        lm.x = x;
        lm.y = y;
        self
    }

    pub fn vis(mut self, idx: LandmarkIndex, visibility: f64) -> Self {
        self.records[idx as usize].visibility = visibility;
        self
    }

    pub fn vis_all(mut self, visibility: f64) -> Self {
        for lm in &mut self.records {
            lm.visibility = visibility;
        }
        self
    }

    pub fn records(self) -> Vec<Landmark> {
        self.records
    }

    pub fn frame(self) -> LandmarkFrame {
        LandmarkFrame::try_from_records(&self.records).expect("fixture frame")
    }
}

/// Tre-positur: venstre kne løftet 0.25 over hoften og foldet inn,
/// foten mot det stående beinet, armene samlet over hodet.
pub fn tree_pose() -> FrameBuilder {
    FrameBuilder::standing()
        .set(LandmarkIndex::LeftKnee, 0.48, 0.30)
        .set(LandmarkIndex::LeftAnkle, 0.50, 0.42)
        .set(LandmarkIndex::LeftHeel, 0.51, 0.44)
        .set(LandmarkIndex::LeftFootIndex, 0.52, 0.45)
        .set(LandmarkIndex::LeftElbow, 0.41, 0.22)
        .set(LandmarkIndex::RightElbow, 0.59, 0.22)
        .set(LandmarkIndex::LeftWrist, 0.42, 0.15)
        .set(LandmarkIndex::RightWrist, 0.58, 0.15)
}

/// Referanseframe for kalibrering: knestigning 0.30, stående bein 170°.
pub fn tree_reference() -> FrameBuilder {
    tree_pose()
        .set(LandmarkIndex::LeftKnee, 0.48, 0.25)
        .set(LandmarkIndex::LeftAnkle, 0.50, 0.40)
        .set(LandmarkIndex::RightAnkle, 0.5895, 0.8874)
}

/// Kriger to: venstre bein fremst (~96°), høyre strakt bak (~178°),
/// armene strake og i vater.
pub fn warrior_two() -> FrameBuilder {
    FrameBuilder::standing()
        .set(LandmarkIndex::LeftHip, 0.47, 0.60)
        .set(LandmarkIndex::LeftKnee, 0.33, 0.62)
        .set(LandmarkIndex::LeftAnkle, 0.34, 0.85)
        .set(LandmarkIndex::LeftHeel, 0.33, 0.88)
        .set(LandmarkIndex::LeftFootIndex, 0.30, 0.89)
        .set(LandmarkIndex::RightHip, 0.53, 0.58)
        .set(LandmarkIndex::RightKnee, 0.64, 0.74)
        .set(LandmarkIndex::RightAnkle, 0.74, 0.89)
        .set(LandmarkIndex::RightHeel, 0.76, 0.91)
        .set(LandmarkIndex::RightFootIndex, 0.78, 0.90)
        .set(LandmarkIndex::LeftElbow, 0.28, 0.30)
        .set(LandmarkIndex::RightElbow, 0.72, 0.30)
        .set(LandmarkIndex::LeftWrist, 0.14, 0.30)
        .set(LandmarkIndex::RightWrist, 0.86, 0.30)
}

/// Planke sett fra siden: skulder/hofte/ankel på linje, strake armer.
pub fn plank() -> FrameBuilder {
    FrameBuilder::standing()
        .set(LandmarkIndex::Nose, 0.12, 0.47)
        .set(LandmarkIndex::LeftShoulder, 0.25, 0.50)
        .set(LandmarkIndex::RightShoulder, 0.27, 0.50)
        .set(LandmarkIndex::LeftElbow, 0.25, 0.62)
        .set(LandmarkIndex::RightElbow, 0.27, 0.62)
        .set(LandmarkIndex::LeftWrist, 0.25, 0.74)
        .set(LandmarkIndex::RightWrist, 0.27, 0.74)
        .set(LandmarkIndex::LeftHip, 0.50, 0.51)
        .set(LandmarkIndex::RightHip, 0.52, 0.51)
        .set(LandmarkIndex::LeftKnee, 0.62, 0.515)
        .set(LandmarkIndex::RightKnee, 0.64, 0.515)
        .set(LandmarkIndex::LeftAnkle, 0.75, 0.52)
        .set(LandmarkIndex::RightAnkle, 0.77, 0.52)
        .set(LandmarkIndex::LeftHeel, 0.78, 0.54)
        .set(LandmarkIndex::RightHeel, 0.80, 0.54)
        .set(LandmarkIndex::LeftFootIndex, 0.76, 0.56)
        .set(LandmarkIndex::RightFootIndex, 0.78, 0.56)
}
