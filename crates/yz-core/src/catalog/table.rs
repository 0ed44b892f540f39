//! The sixty-four hexagrams in King Wen order.
//!
//! Each row names its upper and lower trigram; the six-line symbol is
//! derived from them rather than written out, so the table cannot carry a
//! mistyped or duplicated symbol.

use crate::trigram::Trigram;
use crate::trigram::Trigram::{Dui, Gen, Kan, Kun, Li, Qian, Xun, Zhen};

/// One row of the built-in table.
#[derive(Debug, Clone, Copy)]
pub struct HexagramRow {
    /// King Wen sequence number (1-64).
    pub id: u8,
    /// Display name, e.g. "乾卦".
    pub name: &'static str,
    /// Trigram of lines 4-6.
    pub upper: Trigram,
    /// Trigram of lines 1-3.
    pub lower: Trigram,
    /// The judgment (卦辞).
    pub judgment: &'static str,
    /// The image commentary (大象).
    pub image: &'static str,
    /// A one-line plain reading.
    pub interpretation: &'static str,
}

const fn row(
    id: u8,
    name: &'static str,
    upper: Trigram,
    lower: Trigram,
    judgment: &'static str,
    image: &'static str,
    interpretation: &'static str,
) -> HexagramRow {
    HexagramRow {
        id,
        name,
        upper,
        lower,
        judgment,
        image,
        interpretation,
    }
}

/// All sixty-four hexagrams.
pub const HEXAGRAMS: [HexagramRow; 64] = [
    row(1, "乾卦", Qian, Qian,
        "元亨利贞。",
        "天行健，君子以自强不息。",
        "刚健进取，自强不息，宜积极有为。"),
    row(2, "坤卦", Kun, Kun,
        "元亨，利牝马之贞。君子有攸往，先迷后得主，利西南得朋，东北丧朋。安贞吉。",
        "地势坤，君子以厚德载物。",
        "柔顺包容，厚德载物，宜顺势守成。"),
    row(3, "屯卦", Kan, Zhen,
        "元亨利贞，勿用有攸往，利建侯。",
        "云雷屯，君子以经纶。",
        "万事开头难，宜稳扎稳打，积蓄力量。"),
    row(4, "蒙卦", Gen, Kan,
        "亨。匪我求童蒙，童蒙求我。初筮告，再三渎，渎则不告。利贞。",
        "山下出泉，蒙；君子以果行育德。",
        "启蒙求教，虚心学习，宜寻良师指引。"),
    row(5, "需卦", Kan, Qian,
        "有孚，光亨，贞吉，利涉大川。",
        "云上于天，需；君子以饮食宴乐。",
        "等待时机，耐心守候，时至自然亨通。"),
    row(6, "讼卦", Qian, Kan,
        "有孚，窒惕，中吉，终凶。利见大人，不利涉大川。",
        "天与水违行，讼；君子以作事谋始。",
        "争讼难免，宜止争息讼，谋事于始。"),
    row(7, "师卦", Kun, Kan,
        "贞，丈人吉，无咎。",
        "地中有水，师；君子以容民畜众。",
        "统众行师，需德高者领导，纪律严明。"),
    row(8, "比卦", Kan, Kun,
        "吉。原筮元永贞，无咎。不宁方来，后夫凶。",
        "地上有水，比；先王以建万国，亲诸侯。",
        "亲比相辅，团结协作，宜择善而从。"),
    row(9, "小畜卦", Xun, Qian,
        "亨。密云不雨，自我西郊。",
        "风行天上，小畜；君子以懿文德。",
        "小有积蓄，时机未熟，宜蓄养待发。"),
    row(10, "履卦", Qian, Dui,
        "履虎尾，不咥人，亨。",
        "上天下泽，履；君子以辨上下，定民志。",
        "如履虎尾，谨慎行事，循礼而行可保平安。"),
    row(11, "泰卦", Kun, Qian,
        "小往大来，吉，亨。",
        "天地交，泰；后以财成天地之道，辅相天地之宜，以左右民。",
        "天地交泰，上下通达，诸事顺遂。"),
    row(12, "否卦", Qian, Kun,
        "否之匪人，不利君子贞，大往小来。",
        "天地不交，否；君子以俭德辟难，不可荣以禄。",
        "闭塞不通，宜守正待时，韬光养晦。"),
    row(13, "同人卦", Qian, Li,
        "同人于野，亨。利涉大川，利君子贞。",
        "天与火，同人；君子以类族辨物。",
        "与人和同，广结同道，合作可成大事。"),
    row(14, "大有卦", Li, Qian,
        "元亨。",
        "火在天上，大有；君子以遏恶扬善，顺天休命。",
        "大有收获，盛极当思谦守。"),
    row(15, "谦卦", Kun, Gen,
        "亨，君子有终。",
        "地中有山，谦；君子以裒多益寡，称物平施。",
        "谦虚退让，终得善果。"),
    row(16, "豫卦", Zhen, Kun,
        "利建侯行师。",
        "雷出地奋，豫；先王以作乐崇德，殷荐之上帝，以配祖考。",
        "和乐愉悦，顺时而动，勿耽于安逸。"),
    row(17, "随卦", Dui, Zhen,
        "元亨利贞，无咎。",
        "泽中有雷，随；君子以向晦入宴息。",
        "随顺时势，择善而从。"),
    row(18, "蛊卦", Gen, Xun,
        "元亨，利涉大川。先甲三日，后甲三日。",
        "山下有风，蛊；君子以振民育德。",
        "整治积弊，革故鼎新。"),
    row(19, "临卦", Kun, Dui,
        "元亨利贞。至于八月有凶。",
        "泽上有地，临；君子以教思无穷，容保民无疆。",
        "亲临其事，把握盛时，居安思危。"),
    row(20, "观卦", Xun, Kun,
        "盥而不荐，有孚颙若。",
        "风行地上，观；先王以省方观民设教。",
        "观察省思，以德服人。"),
    row(21, "噬嗑卦", Li, Zhen,
        "亨。利用狱。",
        "雷电噬嗑；先王以明罚敕法。",
        "咬合除障，明辨是非，果断处理阻碍。"),
    row(22, "贲卦", Gen, Li,
        "亨。小利有攸往。",
        "山下有火，贲；君子以明庶政，无敢折狱。",
        "文饰美化，重实质而不尚浮华。"),
    row(23, "剥卦", Gen, Kun,
        "不利有攸往。",
        "山附于地，剥；上以厚下安宅。",
        "剥落衰退，宜顺势而止，静待转机。"),
    row(24, "复卦", Kun, Zhen,
        "亨。出入无疾，朋来无咎。反复其道，七日来复，利有攸往。",
        "雷在地中，复；先王以至日闭关，商旅不行，后不省方。",
        "一阳来复，否极泰来，重新开始。"),
    row(25, "无妄卦", Qian, Zhen,
        "元亨利贞。其匪正有眚，不利有攸往。",
        "天下雷行，物与无妄；先王以茂对时，育万物。",
        "真实无妄，顺其自然，勿存侥幸。"),
    row(26, "大畜卦", Gen, Qian,
        "利贞，不家食吉，利涉大川。",
        "天在山中，大畜；君子以多识前言往行，以畜其德。",
        "积蓄深厚，厚积薄发。"),
    row(27, "颐卦", Gen, Zhen,
        "贞吉。观颐，自求口实。",
        "山下有雷，颐；君子以慎言语，节饮食。",
        "颐养身心，慎言节食，自食其力。"),
    row(28, "大过卦", Dui, Xun,
        "栋桡，利有攸往，亨。",
        "泽灭木，大过；君子以独立不惧，遁世无闷。",
        "负荷过重，非常之时需非常之举。"),
    row(29, "坎卦", Kan, Kan,
        "习坎，有孚，维心亨，行有尚。",
        "水洊至，习坎；君子以常德行，习教事。",
        "重重险陷，守信持中可渡难关。"),
    row(30, "离卦", Li, Li,
        "利贞，亨。畜牝牛，吉。",
        "明两作，离；大人以继明照于四方。",
        "光明依附，柔顺中正，宜依附正道。"),
    row(31, "咸卦", Dui, Gen,
        "亨，利贞，取女吉。",
        "山上有泽，咸；君子以虚受人。",
        "感应相通，以诚相感，利于感情。"),
    row(32, "恒卦", Zhen, Xun,
        "亨，无咎，利贞，利有攸往。",
        "雷风，恒；君子以立不易方。",
        "恒久坚守，持之以恒。"),
    row(33, "遁卦", Qian, Gen,
        "亨，小利贞。",
        "天下有山，遁；君子以远小人，不恶而严。",
        "退避隐遁，以退为进。"),
    row(34, "大壮卦", Zhen, Qian,
        "利贞。",
        "雷在天上，大壮；君子以非礼弗履。",
        "声势壮大，宜守正，勿恃强妄动。"),
    row(35, "晋卦", Li, Kun,
        "康侯用锡马蕃庶，昼日三接。",
        "明出地上，晋；君子以自昭明德。",
        "晋升上进，前程光明。"),
    row(36, "明夷卦", Kun, Li,
        "利艰贞。",
        "明入地中，明夷；君子以莅众，用晦而明。",
        "光明受损，宜韬光养晦，守正待时。"),
    row(37, "家人卦", Xun, Li,
        "利女贞。",
        "风自火出，家人；君子以言有物，而行有恒。",
        "家道和睦，各守其位，齐家为本。"),
    row(38, "睽卦", Li, Dui,
        "小事吉。",
        "上火下泽，睽；君子以同而异。",
        "乖离相背，求同存异，小事可成。"),
    row(39, "蹇卦", Kan, Gen,
        "利西南，不利东北；利见大人，贞吉。",
        "山上有水，蹇；君子以反身修德。",
        "行路艰难，反身修德，求助贤者。"),
    row(40, "解卦", Zhen, Kan,
        "利西南，无所往，其来复吉。有攸往，夙吉。",
        "雷雨作，解；君子以赦过宥罪。",
        "困难解除，宜宽以待人，及时行动。"),
    row(41, "损卦", Gen, Dui,
        "有孚，元吉，无咎，可贞，利有攸往。曷之用，二簋可用享。",
        "山下有泽，损；君子以惩忿窒欲。",
        "减损有度，舍而后得。"),
    row(42, "益卦", Xun, Zhen,
        "利有攸往，利涉大川。",
        "风雷，益；君子以见善则迁，有过则改。",
        "增益进取，见善则迁，有过则改。"),
    row(43, "夬卦", Dui, Qian,
        "扬于王庭，孚号，有厉，告自邑，不利即戎，利有攸往。",
        "泽上于天，夬；君子以施禄及下，居德则忌。",
        "决断果敢，去除障碍，须讲策略。"),
    row(44, "姤卦", Qian, Xun,
        "女壮，勿用取女。",
        "天下有风，姤；后以施命诰四方。",
        "不期而遇，防微杜渐。"),
    row(45, "萃卦", Dui, Kun,
        "亨。王假有庙，利见大人，亨，利贞。用大牲吉，利有攸往。",
        "泽上于地，萃；君子以除戎器，戒不虞。",
        "荟萃聚合，人心凝聚，宜防意外。"),
    row(46, "升卦", Kun, Xun,
        "元亨，用见大人，勿恤，南征吉。",
        "地中生木，升；君子以顺德，积小以高大。",
        "积小成大，稳步上升。"),
    row(47, "困卦", Dui, Kan,
        "亨，贞，大人吉，无咎，有言不信。",
        "泽无水，困；君子以致命遂志。",
        "困顿穷厄，守志不移，少说多做。"),
    row(48, "井卦", Kan, Xun,
        "改邑不改井，无丧无得，往来井井。汔至，亦未繘井，羸其瓶，凶。",
        "木上有水，井；君子以劳民劝相。",
        "井养不穷，修德养人，恒守其源。"),
    row(49, "革卦", Dui, Li,
        "巳日乃孚，元亨利贞，悔亡。",
        "泽中有火，革；君子以治历明时。",
        "变革更新，时机成熟方可行。"),
    row(50, "鼎卦", Li, Xun,
        "元吉，亨。",
        "木上有火，鼎；君子以正位凝命。",
        "鼎新立业，稳重守正。"),
    row(51, "震卦", Zhen, Zhen,
        "亨。震来虩虩，笑言哑哑。震惊百里，不丧匕鬯。",
        "洊雷，震；君子以恐惧修省。",
        "震动惊惧，临危不乱，反省自修。"),
    row(52, "艮卦", Gen, Gen,
        "艮其背，不获其身，行其庭，不见其人，无咎。",
        "兼山，艮；君子以思不出其位。",
        "适可而止，静止守分。"),
    row(53, "渐卦", Xun, Gen,
        "女归吉，利贞。",
        "山上有木，渐；君子以居贤德善俗。",
        "循序渐进，稳健发展。"),
    row(54, "归妹卦", Zhen, Dui,
        "征凶，无攸利。",
        "泽上有雷，归妹；君子以永终知敝。",
        "处事失序，宜知始慎终。"),
    row(55, "丰卦", Zhen, Li,
        "亨，王假之，勿忧，宜日中。",
        "雷电皆至，丰；君子以折狱致刑。",
        "丰盛盈满，盛极防衰。"),
    row(56, "旅卦", Li, Gen,
        "小亨，旅贞吉。",
        "山上有火，旅；君子以明慎用刑，而不留狱。",
        "羁旅在外，谨慎守正。"),
    row(57, "巽卦", Xun, Xun,
        "小亨，利有攸往，利见大人。",
        "随风，巽；君子以申命行事。",
        "谦逊顺入，顺势而行。"),
    row(58, "兑卦", Dui, Dui,
        "亨，利贞。",
        "丽泽，兑；君子以朋友讲习。",
        "喜悦和乐，以诚待人。"),
    row(59, "涣卦", Xun, Kan,
        "亨。王假有庙，利涉大川，利贞。",
        "风行水上，涣；先王以享于帝立庙。",
        "涣散离析，宜凝聚人心。"),
    row(60, "节卦", Kan, Dui,
        "亨。苦节不可贞。",
        "泽上有水，节；君子以制数度，议德行。",
        "节制有度，过犹不及。"),
    row(61, "中孚卦", Xun, Dui,
        "豚鱼吉，利涉大川，利贞。",
        "泽上有风，中孚；君子以议狱缓死。",
        "诚信立身，以信感人。"),
    row(62, "小过卦", Zhen, Gen,
        "亨，利贞，可小事，不可大事。飞鸟遗之音，不宜上宜下，大吉。",
        "山上有雷，小过；君子以行过乎恭，丧过乎哀，用过乎俭。",
        "小有过越，宜低调行小事。"),
    row(63, "既济卦", Kan, Li,
        "亨小，利贞，初吉终乱。",
        "水在火上，既济；君子以思患而豫防之。",
        "事已成就，守成防乱。"),
    row(64, "未济卦", Li, Kan,
        "亨，小狐汔济，濡其尾，无攸利。",
        "火在水上，未济；君子以慎辨物居方。",
        "事未完成，慎始善终，仍有可为。"),
];
